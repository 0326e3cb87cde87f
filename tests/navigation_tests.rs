// tests/navigation_tests.rs
use shapecam_core::{NavCommand, NavOutcome, Roi, RoiNavigator, StepConfig};

fn drive(navigator: &mut RoiNavigator, keys: &str, width: u32, height: u32) -> NavOutcome {
    for command in keys.chars().filter_map(NavCommand::from_key) {
        if navigator.apply(command, width, height) == NavOutcome::Exit {
            return NavOutcome::Exit;
        }
    }
    NavOutcome::Continue
}

#[test]
fn test_roi_never_leaves_frame() {
    let mut navigator = RoiNavigator::default();
    let (width, height) = (640, 480);

    let script = format!("{}{}{}", "d".repeat(100), "s".repeat(60), "x".repeat(10));
    assert_eq!(drive(&mut navigator, &script, width, height), NavOutcome::Continue);

    let roi = *navigator.roi();
    assert!(roi.fits_within(width, height), "{:?}", roi);
    // right and bottom stop one step short of the edge
    assert_eq!(roi, Roi::new(435, 275, 200));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let mut navigator = RoiNavigator::new(Roi::new(50, 50, 100), StepConfig::default());
    assert_eq!(drive(&mut navigator, "qQ1 ?", 640, 480), NavOutcome::Continue);
    assert_eq!(navigator.roi(), &Roi::new(50, 50, 100));
}

#[test]
fn test_exit_stops_processing() {
    let mut navigator = RoiNavigator::new(Roi::new(50, 50, 100), StepConfig::default());
    assert_eq!(drive(&mut navigator, "wedd", 640, 480), NavOutcome::Exit);
    assert_eq!(navigator.roi(), &Roi::new(50, 45, 100));
}

#[test]
fn test_custom_steps() {
    let steps = StepConfig { move_step: 20, zoom_step: 50 };
    let mut navigator = RoiNavigator::new(Roi::new(100, 100, 100), steps);
    drive(&mut navigator, "aazx", 640, 480);
    // zoom out then back in restores the size
    assert_eq!(navigator.roi(), &Roi::new(60, 100, 100));
}
