//! Render speed test - lays out a text once per backend, draws it, and
//! prints how long measuring and drawing took
//!
//! Usage: render-speed-test [TEXT_FILE] [--config PATH]

use anyhow::{bail, Context};
use std::io::Write;
use std::path::PathBuf;
use tiny_render_speed::config::AppConfig;
use tiny_render_speed::{
    normalize_newlines, BackendKind, Error, LoadedFont, RenderSession, SessionOptions, Surface,
    TimingReport,
};

const SAMPLE_TEXT: &[u8] = include_bytes!("../assets/sample.txt");

struct Args {
    text_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        text_path: None,
        config_path: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("usage: render-speed-test [TEXT_FILE] [--config PATH]");
                std::process::exit(0);
            }
            _ if args.text_path.is_none() && !arg.starts_with('-') => {
                args.text_path = Some(PathBuf::from(arg));
            }
            _ => bail!("unexpected argument: {}", arg),
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = AppConfig::load(args.config_path.as_deref())?;

    let bytes = match &args.text_path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => SAMPLE_TEXT.to_vec(),
    };
    let text = simdutf8::basic::from_utf8(&bytes).map_err(|_| Error::InvalidUtf8)?;
    let text = normalize_newlines(text);

    let font = LoadedFont::locate(config.font.path.as_deref())
        .context("set [font] path in render-speed.toml")?;

    let options = SessionOptions::from(&config);
    let mut report = TimingReport::new();

    for kind in BackendKind::ALL {
        let mut surface = Surface::new(config.surface.width, config.surface.height);
        let mut session = RenderSession::new(kind, &text, options);
        for _ in 0..config.bench.paint_count.max(1) {
            session.paint(&mut surface, &font, &mut report)?;
        }

        if let Some(dir) = &config.development.dump_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            surface.write_pgm(&dir.join(format!("{}.pgm", kind.label())))?;
        }
    }

    report.log();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report.dump(&mut out)?;
    out.flush()?;

    if report.records().next().is_none() {
        log::warn!("No timings recorded (repeat_count is 0)");
    }
    Ok(())
}
