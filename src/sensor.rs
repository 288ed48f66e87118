// Tilt input plumbing: the one-shot motion permission request, the channel
// that carries samples to the render loop, and a keyboard stand-in for a gyro.
// Visual: nothing directly; this decides whether tilting or the mouse moves the shine.

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{info, warn};
use std::future::{self, Future};

use crate::config::{BETA_RANGE, GAMMA_RANGE, KEY_TILT_RELAX, KEY_TILT_STEP};
use crate::tilt::ShineContext;

/// One input reading, delivered to the render thread in arrival order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TiltSample {
    /// Device orientation in degrees; either angle may be missing.
    Orientation { gamma: Option<f32>, beta: Option<f32> },
    /// Pointer position in surface pixels.
    Pointer { x: f32, y: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorKind {
    Orientation,
    Motion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
}

#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("{0:?} sensor is not available on this platform")]
    Unsupported(SensorKind),
    #[error("permission request failed: {0}")]
    Rejected(String),
}

/// A source of orientation samples that may sit behind a permission prompt.
pub trait MotionPlatform {
    /// False when sensors can be read without asking first.
    fn needs_permission(&self) -> bool;

    fn request(&self, kind: SensorKind) -> impl Future<Output = Result<PermissionState, SensorError>>;

    /// Start delivering samples into `sink` for the rest of the process.
    fn subscribe(&mut self, sink: Sender<TiltSample>);
}

/// Proof that sensor access was granted. Only `request_motion_access` makes one.
#[derive(Debug)]
pub struct MotionGrant {
    _private: (),
}

impl MotionGrant {
    /// Consumes the grant; the subscription lives as long as the platform does.
    pub fn subscribe<P: MotionPlatform>(self, platform: &mut P, sink: Sender<TiltSample>) {
        platform.subscribe(sink);
    }
}

#[derive(Debug)]
pub enum MotionAccess {
    Granted(MotionGrant),
    Denied,
}

/// Ask once for orientation, then motion. Errors count as "no". Never retried.
pub async fn request_motion_access<P: MotionPlatform>(platform: &P) -> MotionAccess {
    if !platform.needs_permission() {
        return MotionAccess::Granted(MotionGrant { _private: () });
    }
    for kind in [SensorKind::Orientation, SensorKind::Motion] {
        match platform.request(kind).await {
            Ok(PermissionState::Granted) => {
                info!("{kind:?} sensor access granted.");
                return MotionAccess::Granted(MotionGrant { _private: () });
            }
            Ok(PermissionState::Denied) => {}
            Err(e) => info!("{kind:?} permission request failed: {e}"),
        }
    }
    warn!("Motion access denied, using pointer control.");
    MotionAccess::Denied
}

/// Both ends of the sample channel.
pub struct TiltChannel {
    pub tx: Sender<TiltSample>,
    rx: Receiver<TiltSample>,
}

impl TiltChannel {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Apply every pending sample in arrival order. Returns how many were applied.
    pub fn drain_into(&self, ctx: &mut ShineContext) -> usize {
        let mut n = 0;
        for sample in self.rx.try_iter() {
            ctx.apply(sample);
            n += 1;
        }
        n
    }
}

impl Default for TiltChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrow keys currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrowKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl ArrowKeys {
    fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Desktop gyro stand-in: arrows tilt the card, releasing lets it settle back to level.
/// Ungated, so it is granted without a prompt.
#[derive(Default)]
pub struct KeyboardTilt {
    sink: Option<Sender<TiltSample>>,
    gamma: f32,
    beta: f32,
    engaged: bool, // stays quiet until the first key press so the pointer keeps control
}

impl KeyboardTilt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Integrate one frame of key state and emit a sample if subscribed.
    pub fn pump(&mut self, keys: ArrowKeys) {
        let Some(sink) = &self.sink else { return };
        if keys.any() { self.engaged = true; }
        if !self.engaged { return; }

        let axis = |neg: bool, pos: bool| (pos as i32 - neg as i32) as f32;
        let dg = axis(keys.left, keys.right);
        let db = axis(keys.up, keys.down);

        self.gamma = if dg != 0.0 { self.gamma + dg * KEY_TILT_STEP } else { self.gamma * KEY_TILT_RELAX };
        self.beta = if db != 0.0 { self.beta + db * KEY_TILT_STEP } else { self.beta * KEY_TILT_RELAX };
        self.gamma = self.gamma.clamp(-GAMMA_RANGE, GAMMA_RANGE);
        self.beta = self.beta.clamp(-BETA_RANGE, BETA_RANGE);

        // The receiver lives as long as the render loop; a send error only means shutdown.
        let _ = sink.send(TiltSample::Orientation { gamma: Some(self.gamma), beta: Some(self.beta) });
    }
}

impl MotionPlatform for KeyboardTilt {
    fn needs_permission(&self) -> bool {
        false
    }

    fn request(&self, _kind: SensorKind) -> impl Future<Output = Result<PermissionState, SensorError>> {
        future::ready(Ok::<_, SensorError>(PermissionState::Granted))
    }

    fn subscribe(&mut self, sink: Sender<TiltSample>) {
        self.sink = Some(sink);
    }
}

/// A host with no motion sensors at all: every request fails.
pub struct NoMotion;

impl MotionPlatform for NoMotion {
    fn needs_permission(&self) -> bool {
        true
    }

    fn request(&self, kind: SensorKind) -> impl Future<Output = Result<PermissionState, SensorError>> {
        future::ready(Err::<PermissionState, _>(SensorError::Unsupported(kind)))
    }

    fn subscribe(&mut self, _sink: Sender<TiltSample>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardSurface;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// Scripted platform: answers requests from a queue and records what was asked.
    struct Scripted {
        answers: RefCell<Vec<Result<PermissionState, SensorError>>>,
        asked: RefCell<Vec<SensorKind>>,
        subscribed: bool,
    }

    impl Scripted {
        fn new(mut answers: Vec<Result<PermissionState, SensorError>>) -> Self {
            answers.reverse();
            Self { answers: RefCell::new(answers), asked: RefCell::new(vec![]), subscribed: false }
        }
    }

    impl MotionPlatform for Scripted {
        fn needs_permission(&self) -> bool {
            true
        }

        fn request(&self, kind: SensorKind) -> impl Future<Output = Result<PermissionState, SensorError>> {
            self.asked.borrow_mut().push(kind);
            let answer = self.answers.borrow_mut().pop().unwrap_or(Ok(PermissionState::Denied));
            async move { answer }
        }

        fn subscribe(&mut self, _sink: Sender<TiltSample>) {
            self.subscribed = true;
        }
    }

    fn ctx() -> ShineContext {
        ShineContext::new(CardSurface { width: 100, height: 100, origin_x: 0, origin_y: 0 }, (200, 200), false)
    }

    #[test]
    fn ungated_platform_is_granted_without_asking() {
        assert!(matches!(block_on(request_motion_access(&KeyboardTilt::new())), MotionAccess::Granted(_)));
    }

    #[test]
    fn falls_back_to_motion_when_orientation_is_refused() {
        let mut p = Scripted::new(vec![Ok(PermissionState::Denied), Ok(PermissionState::Granted)]);
        let access = block_on(request_motion_access(&p));
        match access {
            MotionAccess::Granted(grant) => grant.subscribe(&mut p, TiltChannel::new().tx),
            MotionAccess::Denied => panic!("expected the motion request to be granted"),
        }
        assert_eq!(*p.asked.borrow(), vec![SensorKind::Orientation, SensorKind::Motion]);
        assert!(p.subscribed);
    }

    #[test]
    fn errors_count_as_denial() {
        let p = Scripted::new(vec![
            Err(SensorError::Rejected("user dismissed".into())),
            Ok(PermissionState::Denied),
        ]);
        assert!(matches!(block_on(request_motion_access(&p)), MotionAccess::Denied));
        assert_eq!(p.asked.borrow().len(), 2);

        assert!(matches!(block_on(request_motion_access(&NoMotion)), MotionAccess::Denied));
    }

    #[test]
    fn granted_subscription_delivers_samples_in_order() {
        let channel = TiltChannel::new();
        let mut keys = KeyboardTilt::new();
        let access = block_on(request_motion_access(&keys));
        match access {
            MotionAccess::Granted(grant) => grant.subscribe(&mut keys, channel.tx.clone()),
            MotionAccess::Denied => panic!("keyboard tilt is ungated"),
        }

        keys.pump(ArrowKeys::default()); // not engaged yet: silent
        keys.pump(ArrowKeys { right: true, ..Default::default() });
        keys.pump(ArrowKeys { right: true, down: true, ..Default::default() });

        let mut c = ctx();
        assert_eq!(channel.drain_into(&mut c), 2);
        assert_eq!(c.tilt(), (2.0 * KEY_TILT_STEP, KEY_TILT_STEP)); // last sample wins
        assert!(!c.pointer_enabled());
    }

    #[test]
    fn released_keys_settle_toward_level() {
        let channel = TiltChannel::new();
        let mut keys = KeyboardTilt::new();
        keys.subscribe(channel.tx.clone());
        keys.pump(ArrowKeys { left: true, ..Default::default() });
        for _ in 0..100 {
            keys.pump(ArrowKeys::default());
        }
        let mut c = ctx();
        channel.drain_into(&mut c);
        assert!(c.tilt().0.abs() < 0.01);
    }

    #[test]
    fn pointer_samples_flow_through_the_channel() {
        let channel = TiltChannel::default();
        channel.tx.send(TiltSample::Pointer { x: 200.0, y: 100.0 }).unwrap();
        let mut c = ctx();
        channel.drain_into(&mut c);
        assert_eq!(c.tilt(), (GAMMA_RANGE, 0.0));
    }
}
