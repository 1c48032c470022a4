use mqttplot_view::api::{
    MAX_AXIS_INTERVALS, MemorySeriesStore, SeriesSource, TickConfig, UnitTag, ViewConfig,
    ViewSession,
};
use mqttplot_view::core::{Sample, TimeSpan};
use mqttplot_view::{ViewError, ViewResult};

const T0: f64 = 1_700_000_000.0;
const HOUR: f64 = 3_600.0;

fn seeded_store() -> MemorySeriesStore {
    let mut store = MemorySeriesStore::new();
    store.set_samples(
        "garage/temp",
        (0..=48)
            .map(|i| Sample::new(T0 + f64::from(i) * HOUR, 69.4))
            .collect(),
    );
    store.set_tick_config("garage/temp", TickConfig::with_min_tick(1.0));
    store.set_unit_tag("garage/temp", Some(UnitTag::TempF.tag()));
    store
}

#[test]
fn frame_for_flat_series_uses_two_interval_axis() {
    let store = seeded_store();
    let session =
        ViewSession::open(&store, ["garage/temp"], &ViewConfig::default(), None).expect("open");

    let frame = session.frame(&store, &store).expect("frame").expect("data");
    assert_eq!(frame.window, TimeSpan::new(T0 + 44.0 * HOUR, T0 + 48.0 * HOUR));
    assert_eq!(frame.preset.label(), "4h");
    assert!(frame.live);
    assert_eq!(frame.series.len(), 1);
    assert_eq!(frame.series[0].samples.len(), 5);

    let axis = frame.axis.expect("axis");
    assert_eq!(axis.range, [68.0, 70.0]);
    assert_eq!(frame.unit_label, "Temperature (°F)");
    assert_eq!(frame.tick_labels, vec!["68", "69", "70"]);
}

#[test]
fn shared_axis_uses_lcm_of_series_ticks() {
    let mut store = seeded_store();
    store.set_samples(
        "garage/humidity",
        (0..=48)
            .map(|i| Sample::new(T0 + f64::from(i) * HOUR, 72.0 + f64::from(i % 2)))
            .collect(),
    );
    store.set_tick_config("garage/humidity", TickConfig::with_min_tick(1.5));

    let session = ViewSession::open(
        &store,
        ["garage/temp", "garage/humidity"],
        &ViewConfig::default(),
        None,
    )
    .expect("open");
    let frame = session.frame(&store, &store).expect("frame").expect("data");

    let axis = frame.axis.expect("axis");
    assert_eq!(axis.dtick, 3.0);
    assert!(axis.lo() <= 69.4 && axis.hi() >= 73.0);
    assert_eq!(frame.unit_label, "Temperature (°F)");
}

#[test]
fn unknown_unit_tag_is_shown_verbatim() {
    let mut store = seeded_store();
    store.set_unit_tag("garage/temp", Some("kWh"));

    let session =
        ViewSession::open(&store, ["garage/temp"], &ViewConfig::default(), None).expect("open");
    let frame = session.frame(&store, &store).expect("frame").expect("data");
    assert_eq!(frame.unit_label, "kWh");
    assert_eq!(frame.tick_labels, vec!["68", "69", "70"]);

    store.set_unit_tag("garage/temp", Some("  "));
    let frame = session.frame(&store, &store).expect("frame").expect("data");
    assert_eq!(frame.unit_label, "Value");
}

#[test]
fn wide_spread_counter_gets_bounded_axis() {
    let mut store = MemorySeriesStore::new();
    store.set_samples(
        "plant/counter",
        vec![Sample::new(T0, 0.0), Sample::new(T0 + HOUR, 1e9)],
    );
    store.set_tick_config("plant/counter", TickConfig::with_min_tick(0.001));

    let session =
        ViewSession::open(&store, ["plant/counter"], &ViewConfig::default(), None).expect("open");
    let frame = session.frame(&store, &store).expect("frame").expect("data");

    let axis = frame.axis.expect("axis");
    assert!(axis.lo() <= 0.0 && axis.hi() >= 1e9);
    assert!(frame.tick_labels.len() <= MAX_AXIS_INTERVALS + 1);
    assert_eq!(frame.tick_labels.len(), axis.tick_values().len());
}

#[test]
fn missing_tick_config_keeps_automatic_axis() {
    let mut store = seeded_store();
    store.set_tick_config("garage/temp", TickConfig::parse("not a number"));

    let session =
        ViewSession::open(&store, ["garage/temp"], &ViewConfig::default(), None).expect("open");
    let frame = session.frame(&store, &store).expect("frame").expect("data");
    assert_eq!(frame.axis, None);
    assert!(frame.tick_labels.is_empty());
}

#[test]
fn empty_series_produces_no_frame_until_data_arrives() {
    let store = MemorySeriesStore::new();
    let mut session =
        ViewSession::open(&store, ["porch/lux"], &ViewConfig::default(), None).expect("open");

    assert_eq!(session.frame(&store, &store).expect("frame"), None);
    assert!(!session.zoom_in());
    assert!(!session.back());

    assert!(!session.on_new_sample("other/topic", T0));
    assert!(session.on_new_sample("porch/lux", T0));
    assert!(session.is_live());
}

#[test]
fn navigation_moves_frame_window() {
    let store = seeded_store();
    let mut session = ViewSession::open(
        &store,
        ["garage/temp"],
        &ViewConfig::default(),
        Some(8.0 * HOUR),
    )
    .expect("open");

    assert!(session.back());
    let frame = session.frame(&store, &store).expect("frame").expect("data");
    assert_eq!(frame.window, TimeSpan::new(T0 + 32.0 * HOUR, T0 + 40.0 * HOUR));
    assert!(!frame.live);
    assert!(frame.navigation.forward);

    assert!(session.forward());
    assert!(session.is_live());
}

#[test]
fn refresh_bounds_follows_retention_purge() {
    let mut store = seeded_store();
    let mut session =
        ViewSession::open(&store, ["garage/temp"], &ViewConfig::default(), None).expect("open");
    session.select_preset(4);
    for _ in 0..3 {
        session.back();
    }

    store.purge_before("garage/temp", T0 + 12.0 * HOUR);
    assert!(session.refresh_bounds(&store).expect("refresh"));
    let window = session.controller().window().expect("window");
    assert_eq!(window.start(), T0 + 12.0 * HOUR);
}

struct FailingSource;

impl SeriesSource for FailingSource {
    fn bounds(&self, _series: &str) -> ViewResult<Option<mqttplot_view::core::DataBounds>> {
        Err(ViewError::Source("database locked".to_owned()))
    }

    fn samples(&self, _series: &str, _window: TimeSpan) -> ViewResult<Vec<Sample>> {
        Err(ViewError::Source("database locked".to_owned()))
    }
}

#[test]
fn source_errors_propagate() {
    let result = ViewSession::open(&FailingSource, ["a"], &ViewConfig::default(), None);
    assert!(matches!(result, Err(ViewError::Source(_))));

    let store = seeded_store();
    let session =
        ViewSession::open(&store, ["garage/temp"], &ViewConfig::default(), None).expect("open");
    assert!(matches!(
        session.frame(&FailingSource, &store),
        Err(ViewError::Source(_))
    ));
}
