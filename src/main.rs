// What you SEE:
// • The background with the card artwork on top.
// • A soft white shine that follows the tilt (arrow keys) or the mouse, easing behind it.
// • A sharper shine and twinkling glitter that only appear on the lacquered parts of the card.
// • ESC quits.

mod assets;
mod config;
mod draw;
mod error;
mod mask;
mod raster;
mod sensor;
mod shine;
mod sparkle;
mod tilt;
mod types;

use assets::Assets;
use config::{MotionSource, Settings, WINDOW_TITLE};
use draw::Drawer;
use error::Error;
use futures::executor::block_on;
use log::{LevelFilter, debug, error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sensor::{KeyboardTilt, MotionAccess, MotionPlatform, NoMotion, TiltChannel, TiltSample, request_motion_access};
use shine::ShineRenderer;
use std::time::{Duration, Instant};
use tilt::ShineContext;
use types::FrameBuffer;

/// Ask the platform once; subscribe it to the channel only if access was granted.
fn connect_motion<P: MotionPlatform>(platform: &mut P, channel: &TiltChannel) -> bool {
    let access = block_on(request_motion_access(&*platform));
    match access {
        MotionAccess::Granted(grant) => {
            grant.subscribe(platform, channel.tx.clone());
            true
        }
        MotionAccess::Denied => false,
    }
}

fn run() -> Result<(), Error> {
    let settings = Settings::load(&Settings::path_from_env())?;
    let card = settings.card;

    /* --- Assets ---
       Visual: nothing yet; decoded images held in RAM. */
    let assets = Assets::load(&settings.background_path, &settings.card_path, &settings.mask_path, &card)?;
    let (w, h) = (assets.background.width() as usize, assets.background.height() as usize);

    /* --- Lacquer mask + sparkles (once) ---
       Visual: decides where glitter and the sharp shine may appear. */
    let lacquer = mask::build_mask(&assets.mask, &card);
    info!(
        "Lacquer mask {}x{}: {} of {} pixels glossy.",
        lacquer.width, lacquer.height, lacquer.coverage(), lacquer.bits.len()
    );
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let sparkles = sparkle::seed_sparkles(&lacquer, settings.sparkle_count, &mut rng)?;
    info!("Seeded {} sparkles.", sparkles.len());

    /* --- Input ---
       Visual: arrows tilt the card once granted; until then (or if denied) the mouse drives the shine. */
    let channel = TiltChannel::new();
    let mut keyboard = KeyboardTilt::new();
    let motion = match settings.motion {
        MotionSource::Keyboard => connect_motion(&mut keyboard, &channel),
        MotionSource::None => connect_motion(&mut NoMotion, &channel),
    };
    info!("Motion input: {}.", if motion { "enabled" } else { "pointer only" });
    let mut ctx = ShineContext::new(card, (w, h), settings.touch);

    /* --- Window + reusable buffers --- */
    let mut drawer = Drawer::new(WINDOW_TITLE, w, h, settings.fps)?;
    let mut screen = FrameBuffer::new(w, h);
    let mut shine = ShineRenderer::new(&card);

    let mut frame: u64 = 0;
    let mut last_pointer: Option<(f32, f32)> = None;
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Inputs → samples → context */
        keyboard.pump(drawer.arrow_keys());
        if let Some(pos) = drawer.mouse_pos() {
            if last_pointer != Some(pos) && ctx.pointer_enabled() {
                // Sender and receiver are both owned here; the send cannot fail.
                let _ = channel.tx.send(TiltSample::Pointer { x: pos.0, y: pos.1 });
            }
            last_pointer = Some(pos);
        }
        channel.drain_into(&mut ctx);

        /* 2) Ease the shine center toward the tilt target */
        ctx.step();
        let center = ctx.center();

        /* 3) Compose: background, card, broad + lacquer shine, sparkles */
        raster::copy_image(&mut screen, &assets.background);
        raster::blit_over(&mut screen, &assets.card, card.origin_x, card.origin_y);
        shine.draw(&mut screen, &card, &lacquer, center);
        sparkle::draw_sparkles(&mut screen, &sparkles, &card, center, frame);

        /* 4) Present (blocks until the next refresh tick) */
        drawer.present(&screen)?;
        frame += 1;

        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / now.duration_since(last_fps_time).as_secs_f32();
            let (gamma, beta) = ctx.tilt();
            debug!(
                "FPS: {:.1} | tilt ({:.1}, {:.1}) | center ({:.1}, {:.1})",
                fps, gamma, beta, center.0, center.1
            );
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Holo Card starting...");
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("Exited cleanly.");
}
