use mqttplot_view::core::{
    DataBounds, NavigationAvailability, SpanPresets, WindowController, WindowTuning,
};

const T0: f64 = 1_700_000_000.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 24.0 * HOUR;

fn ten_day_bounds() -> Option<DataBounds> {
    DataBounds::new(T0, T0 + 10.0 * DAY)
}

fn controller_at_tail() -> WindowController {
    let mut controller = WindowController::default();
    controller
        .initialize(ten_day_bounds(), None)
        .expect("window initialized");
    controller
}

#[test]
fn initialize_pins_default_span_to_tail() {
    let controller = controller_at_tail();
    let state = controller.state().expect("state");

    assert_eq!(state.preset_index, 1);
    assert_eq!(state.end, T0 + 10.0 * DAY);
    assert_eq!(state.start, T0 + 10.0 * DAY - 4.0 * HOUR);
    assert!(state.follow_tail);
    assert!(controller.is_live());
}

#[test]
fn forward_slide_at_tail_is_clamped() {
    let mut controller = controller_at_tail();
    let before = controller.state().expect("state");

    assert!(!controller.slide(1.0));
    let after = controller.state().expect("state");
    assert_eq!(after, before);
    assert!(after.follow_tail);
}

#[test]
fn requested_span_snaps_to_nearest_preset() {
    let mut controller = WindowController::default();
    let state = controller
        .initialize(ten_day_bounds(), Some(20.0 * HOUR))
        .expect("state");

    assert_eq!(state.preset_index, 4);
    assert_eq!(state.end - state.start, DAY);
}

#[test]
fn no_data_disables_every_operation() {
    let mut controller = WindowController::default();
    assert_eq!(controller.initialize(None, None), None);

    assert!(!controller.zoom_in());
    assert!(!controller.zoom_out());
    assert!(!controller.slide(-1.0));
    assert!(!controller.slide(1.0));
    assert!(!controller.jump_to_tail());
    assert!(!controller.select_preset(3));
    assert!(!controller.is_live());
    assert_eq!(controller.window(), None);
    assert_eq!(controller.navigation(), NavigationAvailability::default());
}

#[test]
fn data_narrower_than_span_collapses_window() {
    let mut controller = WindowController::default();
    let state = controller
        .initialize(DataBounds::new(T0, T0 + HOUR), None)
        .expect("state");

    assert_eq!((state.start, state.end), (T0, T0 + HOUR));
    assert!(!controller.slide(-1.0));
    assert!(!controller.back());
}

#[test]
fn zoom_in_keeps_center_and_releases_tail() {
    let mut controller = controller_at_tail();
    let center = controller.window().expect("window").center();

    assert!(controller.zoom_in());
    let state = controller.state().expect("state");
    assert_eq!(state.preset_index, 0);
    assert_eq!(state.start, center - HOUR);
    assert_eq!(state.end, center + HOUR);
    assert!(!state.follow_tail);
    assert!(!controller.is_live());

    assert!(controller.zoom_out());
    let state = controller.state().expect("state");
    assert_eq!(state.span().center(), center);
    assert_eq!(state.end, T0 + 10.0 * DAY);
}

#[test]
fn zoom_out_at_tail_stays_live() {
    let mut controller = controller_at_tail();
    assert!(controller.zoom_out());

    let state = controller.state().expect("state");
    assert_eq!(state.preset_index, 2);
    assert_eq!(state.end, T0 + 10.0 * DAY);
    assert_eq!(state.end - state.start, 8.0 * HOUR);
    assert!(controller.is_live());
}

#[test]
fn zoom_is_noop_at_either_end_of_preset_ladder() {
    let mut controller = controller_at_tail();
    assert!(controller.zoom_in());
    assert!(!controller.zoom_in());

    let last = controller.presets().last_index();
    assert!(controller.select_preset(last));
    assert!(!controller.zoom_out());
}

#[test]
fn back_then_forward_returns_to_tail() {
    let mut controller = controller_at_tail();

    assert!(controller.back());
    let state = controller.state().expect("state");
    assert_eq!(state.end, T0 + 10.0 * DAY - 4.0 * HOUR);
    assert_eq!(state.start, T0 + 10.0 * DAY - 8.0 * HOUR);
    assert!(!state.follow_tail);

    assert!(controller.forward());
    let state = controller.state().expect("state");
    assert_eq!(state.end, T0 + 10.0 * DAY);
    assert!(state.follow_tail);
}

#[test]
fn partial_forward_slide_stays_historical() {
    let mut controller = controller_at_tail();
    controller.back();
    controller.back();

    assert!(controller.slide(0.5));
    let state = controller.state().expect("state");
    assert_eq!(state.end, T0 + 10.0 * DAY - 6.0 * HOUR);
    assert_eq!(state.start, T0 + 10.0 * DAY - 10.0 * HOUR);
    assert!(!state.follow_tail);
}

#[test]
fn forward_slide_past_tail_snaps_to_tail() {
    let mut controller = controller_at_tail();
    controller.back();
    assert!(controller.slide(0.5));
    assert!(controller.slide(0.75));

    let state = controller.state().expect("state");
    assert_eq!(state.end, T0 + 10.0 * DAY);
    assert_eq!(state.end - state.start, 4.0 * HOUR);
    assert!(state.follow_tail);
}

#[test]
fn backward_slide_stops_at_data_start() {
    let mut controller = WindowController::default();
    controller.initialize(DataBounds::new(T0, T0 + 6.0 * HOUR), None);

    assert!(controller.back());
    let state = controller.state().expect("state");
    assert_eq!((state.start, state.end), (T0, T0 + 4.0 * HOUR));
    assert!(!controller.back());
}

#[test]
fn zero_and_non_finite_slides_are_ignored() {
    let mut controller = controller_at_tail();
    assert!(!controller.slide(0.0));
    assert!(!controller.slide(f64::NAN));
    assert!(controller.is_live());
}

#[test]
fn new_sample_advances_live_window() {
    let mut controller = controller_at_tail();
    let tail = T0 + 10.0 * DAY + 60.0;

    assert!(controller.on_new_sample(tail));
    let state = controller.state().expect("state");
    assert_eq!(state.end, tail);
    assert_eq!(state.end - state.start, 4.0 * HOUR);
    assert!(state.follow_tail);
    assert!(controller.is_live());
}

#[test]
fn new_sample_never_moves_historical_view() {
    let mut controller = controller_at_tail();
    controller.back();
    let before = controller.state().expect("state");

    assert!(!controller.on_new_sample(T0 + 10.0 * DAY + 60.0));
    assert_eq!(controller.state(), Some(before));
    let bounds = controller.bounds().expect("bounds");
    assert_eq!(bounds.max, T0 + 10.0 * DAY + 60.0);
}

#[test]
fn stale_and_invalid_samples_leave_window_untouched() {
    let mut controller = controller_at_tail();
    let before = controller.state();

    assert!(!controller.on_new_sample(T0 + DAY));
    assert!(!controller.on_new_sample(f64::NAN));
    assert_eq!(controller.state(), before);
}

#[test]
fn first_sample_opens_empty_view() {
    let mut controller = WindowController::default();
    controller.initialize(None, None);

    assert!(controller.on_new_sample(T0));
    let state = controller.state().expect("state");
    assert_eq!((state.start, state.end), (T0, T0));
    assert!(controller.is_live());

    assert!(controller.on_new_sample(T0 + HOUR));
    let state = controller.state().expect("state");
    assert_eq!((state.start, state.end), (T0, T0 + HOUR));
}

#[test]
fn collapsed_live_window_grows_with_new_samples() {
    let mut controller = WindowController::default();
    controller.initialize(DataBounds::new(T0, T0 + HOUR), None);

    assert!(controller.on_new_sample(T0 + 5.0 * HOUR));
    let state = controller.state().expect("state");
    assert_eq!((state.start, state.end), (T0 + HOUR, T0 + 5.0 * HOUR));
}

#[test]
fn tail_tolerance_is_configurable() {
    let tuning = WindowTuning {
        tail_tolerance_seconds: 0.0,
        ..WindowTuning::default()
    };
    let mut controller =
        WindowController::new(SpanPresets::default(), tuning).expect("controller");
    controller.initialize(ten_day_bounds(), None);

    assert!(controller.is_live());
    assert!(controller.on_new_sample(T0 + 10.0 * DAY + 1.0));
    assert!(controller.is_live());
}

#[test]
fn select_preset_at_tail_keeps_following() {
    let mut controller = controller_at_tail();
    assert!(controller.select_preset(4));

    let state = controller.state().expect("state");
    assert_eq!(state.end, T0 + 10.0 * DAY);
    assert_eq!(state.start, T0 + 9.0 * DAY);
    assert!(state.follow_tail);
    assert_eq!(controller.preset().expect("preset").label(), "1d");

    assert!(!controller.select_preset(4));
    assert!(!controller.select_preset(99));
}

#[test]
fn select_preset_on_history_zooms_around_center() {
    let mut controller = controller_at_tail();
    controller.back();
    let center = controller.window().expect("window").center();

    assert!(controller.select_preset(0));
    let window = controller.window().expect("window");
    assert_eq!(window.center(), center);
    assert_eq!(window.length(), 2.0 * HOUR);
}

#[test]
fn jump_to_tail_restores_live_view() {
    let mut controller = controller_at_tail();
    controller.back();
    controller.back();
    assert!(!controller.is_live());

    assert!(controller.jump_to_tail());
    assert!(controller.is_live());
    assert!(!controller.jump_to_tail());
}

#[test]
fn set_bounds_repins_live_view_and_clamps_history() {
    let mut controller = controller_at_tail();
    assert!(controller.set_bounds(DataBounds::new(T0, T0 + 11.0 * DAY)));
    let state = controller.state().expect("state");
    assert_eq!(state.end, T0 + 11.0 * DAY);
    assert!(state.follow_tail);

    let mut historical = controller_at_tail();
    historical.select_preset(4);
    for _ in 0..9 {
        historical.back();
    }
    let state = historical.state().expect("state");
    assert_eq!(state.start, T0);

    assert!(historical.set_bounds(DataBounds::new(T0 + 2.0 * DAY, T0 + 10.0 * DAY)));
    let state = historical.state().expect("state");
    assert_eq!((state.start, state.end), (T0 + 2.0 * DAY, T0 + 3.0 * DAY));
    assert!(!state.follow_tail);

    assert!(historical.set_bounds(None));
    assert_eq!(historical.state(), None);
    assert!(!historical.set_bounds(None));
}

#[test]
fn navigation_reflects_position() {
    let mut controller = controller_at_tail();
    assert_eq!(
        controller.navigation(),
        NavigationAvailability {
            back: true,
            forward: false,
            zoom_in: true,
            zoom_out: true,
            jump_to_tail: false,
        }
    );

    controller.back();
    let navigation = controller.navigation();
    assert!(navigation.forward);
    assert!(navigation.jump_to_tail);
}
