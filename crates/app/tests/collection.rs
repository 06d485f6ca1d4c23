use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use xmaslights_app::{
    Animation, BoostPolicy, Collection, Color, FrameAllocator, Hertz, PlaybackConfig,
    PlaybackState, Position, Unit, UnitsRender, XmaslightsError, VERTICAL_OFFSET,
};

const RED: Option<Color> = Some(Color { r: 255, g: 0, b: 0 });
const GREEN: Option<Color> = Some(Color { r: 0, g: 255, b: 0 });
const BLUE: Option<Color> = Some(Color { r: 0, g: 0, b: 255 });

/// Remembers unit colors of every render call.
#[derive(Clone, Default)]
struct RecordingRender(Arc<Mutex<Vec<Vec<Option<Color>>>>>);

impl RecordingRender {
    fn snapshots(&self) -> Vec<Vec<Option<Color>>> {
        self.0.lock().unwrap().clone()
    }

    fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl UnitsRender for RecordingRender {
    fn render(&mut self, units: &[Unit]) {
        self.0
            .lock()
            .unwrap()
            .push(units.iter().map(Unit::color).collect());
    }
}

fn three_units() -> (Collection<RecordingRender>, RecordingRender) {
    let _ = env_logger::try_init();

    let render = RecordingRender::default();
    let mut collection = Collection::with_render(render.clone());
    collection.populate([(0.0, 0.0, 0.0), (1.0, 1.0, 0.5), (2.0, 2.0, 1.0)]);
    (collection, render)
}

fn colors(collection: &Collection<RecordingRender>) -> Vec<Option<Color>> {
    collection.units().iter().map(Unit::color).collect()
}

#[tokio::test(start_paused = true)]
async fn test_two_frames_without_loop() {
    let (mut collection, render) = three_units();

    let animation = Animation::new(vec![vec![255, 0, 0, 0, 255, 0, 0, 0, 255], vec![0; 9]], 60);
    let summary = collection.animate(animation, false).await.unwrap();

    assert_eq!(summary.frames_applied, 2);
    assert_eq!(summary.passes, 1);
    assert!(!summary.stopped);
    assert_eq!(collection.state(), PlaybackState::Idle);

    // Populate, two frames and the final reset.
    let snapshots = render.snapshots();
    assert_eq!(snapshots.len(), 4);
    assert_eq!(snapshots[1], vec![RED, GREEN, BLUE]);
    assert_eq!(snapshots[2], vec![None, None, None]);
    assert_eq!(snapshots[3], vec![None, None, None]);
}

#[tokio::test(start_paused = true)]
async fn test_animate_applies_each_frame_once() {
    let (mut collection, render) = three_units();

    let frames: Vec<_> = (1..=5_u8).map(|i| vec![i; 9]).collect();
    let summary = collection
        .animate(Animation::new(frames, 30), false)
        .await
        .unwrap();

    assert_eq!(summary.frames_applied, 5);
    assert_eq!(render.count(), 1 + 5 + 1);
    assert!(colors(&collection).iter().all(Option::is_none));
    assert_eq!(collection.state(), PlaybackState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_animate_respects_frame_rate() {
    let (mut collection, _render) = three_units();

    let started_at = tokio::time::Instant::now();
    collection
        .animate(Animation::new(vec![vec![1; 9]; 10], 10), false)
        .await
        .unwrap();
    // Ten frames at 10 FPS and the settle delay.
    assert!(started_at.elapsed() >= Duration::from_millis(1_000));
}

#[test]
fn test_apply_frame_length_mismatch() {
    let (mut collection, _render) = three_units();

    assert_eq!(
        collection.apply_frame(&[255; 8]),
        Err(XmaslightsError::FrameLengthMismatch {
            expected: 9,
            actual: 8
        })
    );
    assert!(colors(&collection).iter().all(Option::is_none));
}

#[tokio::test(start_paused = true)]
async fn test_animate_aborts_on_frame_length_mismatch() {
    let (mut collection, render) = three_units();

    let animation = Animation::new(vec![vec![255; 9], vec![255; 6], vec![255; 9]], 60);
    let err = collection.animate(animation, true).await.unwrap_err();

    assert_eq!(
        err,
        XmaslightsError::FrameLengthMismatch {
            expected: 9,
            actual: 6
        }
    );
    assert_eq!(collection.state(), PlaybackState::Idle);
    assert!(colors(&collection).iter().all(Option::is_none));
    // Populate, the first frame and the reset after the abort.
    assert_eq!(render.count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_animate_with_zero_fps() {
    let (mut collection, render) = three_units();

    assert_eq!(
        collection
            .animate(Animation::new(vec![vec![1; 9]], Hertz(0)), false)
            .await,
        Err(XmaslightsError::InvalidFps)
    );
    assert_eq!(collection.state(), PlaybackState::Idle);
    assert_eq!(render.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_animate_empty_animation() {
    let (mut collection, render) = three_units();

    let summary = collection
        .animate(Animation::new(Vec::new(), 60), true)
        .await
        .unwrap();
    assert_eq!(summary.frames_applied, 0);
    assert_eq!(summary.passes, 0);
    // Only the teardown has been rendered.
    assert_eq!(render.count(), 2);
    assert_eq!(collection.state(), PlaybackState::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_animation_leaves_collection_idle() {
    let (mut collection, render) = three_units();

    let animation = Animation::new(vec![vec![1; 9], vec![2; 9]], 10);
    let elapsed =
        tokio::time::timeout(Duration::from_millis(250), collection.animate(animation, true)).await;
    assert!(elapsed.is_err());
    assert_eq!(collection.state(), PlaybackState::Idle);

    // The interrupted run has turned the units off and shown that.
    assert_eq!(colors(&collection), vec![None; 3]);
    assert!(collection.units().iter().all(|unit| !unit.is_boosted()));
    assert_eq!(render.snapshots().last(), Some(&vec![None; 3]));

    // The collection can be animated again.
    let summary = collection
        .animate(Animation::new(vec![vec![3; 9]], 10), false)
        .await
        .unwrap();
    assert_eq!(summary.frames_applied, 1);
}

#[test]
fn test_populate_swaps_axes_and_recenters() {
    let mut collection = Collection::new();
    collection.populate([(1.0, 2.0, 3.0), (3.0, 4.0, 5.0)]);

    let positions: Vec<_> = collection.units().iter().map(Unit::position).collect();
    assert_eq!(positions.len(), 2);
    assert!((positions[0].x + 1.0).abs() < 1e-9);
    assert!((positions[1].x - 1.0).abs() < 1e-9);
    assert!((positions[0].y - (3.0 + VERTICAL_OFFSET)).abs() < 1e-9);
    assert!((positions[1].y - (5.0 + VERTICAL_OFFSET)).abs() < 1e-9);
    assert!((positions[0].z + 1.0).abs() < 1e-9);
    assert!((positions[1].z - 1.0).abs() < 1e-9);
}

#[test]
fn test_populate_nothing() {
    let mut collection = Collection::new();
    collection.populate(std::iter::empty());
    assert!(collection.is_empty());
    assert_eq!(collection.apply_frame(&[]), Ok(()));
}

#[test]
fn test_add_unit_and_clear() {
    let mut collection = Collection::new();
    collection.add_unit(Position::new(5.0, 1.0, 5.0));
    // A single unit is not re-centered.
    assert_eq!(collection.units()[0].position(), Position::new(5.0, 1.0, 5.0));
    assert_eq!(collection.len(), 1);

    collection.clear();
    assert!(collection.is_empty());
}

#[test]
fn test_static_frame_does_not_boost() {
    let (mut collection, _render) = three_units();

    let frame = [255, 0, 0, 0, 0, 0, 0, 0, 255];
    collection.apply_frame(&frame).unwrap();
    let boosted: Vec<_> = collection.units().iter().map(Unit::is_boosted).collect();
    assert_eq!(boosted, vec![true, false, true]);

    collection.apply_frame(&frame).unwrap();
    assert!(collection.units().iter().all(|unit| !unit.is_boosted()));
}

#[test]
fn test_sticky_boost_from_config() {
    let config = PlaybackConfig {
        boost_policy: BoostPolicy::Sticky,
        boost_cap: 1,
        ..PlaybackConfig::default()
    };
    let mut collection = Collection::from_config(&config, RecordingRender::default());
    collection.populate([(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)]);

    collection.apply_frame(&[9, 9, 9, 9, 9, 9]).unwrap();
    collection.apply_frame(&[9, 9, 9, 9, 9, 9]).unwrap();
    let boosted: Vec<_> = collection.units().iter().map(Unit::is_boosted).collect();
    assert_eq!(boosted, vec![false, true]);
}

#[test]
fn test_boost_cap_in_large_collection() {
    let mut collection = Collection::new().with_allocator(FrameAllocator::default());
    collection.populate((0..250).map(|i| (f64::from(i), 0.0, 0.0)));

    collection.apply_frame(&vec![200; 250 * 3]).unwrap();
    let boosted: Vec<_> = collection
        .units()
        .iter()
        .enumerate()
        .filter(|(_, unit)| unit.is_boosted())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(boosted, (150..250).collect::<Vec<_>>());
}
