use {
    grab_base::{default_level, init_file_logger, init_stdout_logger, log_fatal},
    grab_capture::*,
    log::info,
};

const USAGE: &str = "Usage: grab <image> [--height N] [--width N] [--device SPEC] [--filter nearest|bilinear] [--config FILE] [--log-dir DIR]";

struct Args {
    image: String,
    config: CaptureConfig,
    log_dir: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut image = None;
    let mut config_path = None;
    let mut log_dir = None;
    let mut overrides: Vec<(String, String)> = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--height" | "--width" | "--device" | "--filter" | "--config" | "--log-dir" => {
                let value = args.next().ok_or_else(|| format!("missing value for {arg}"))?;
                match arg.as_str() {
                    "--config" => config_path = Some(value),
                    "--log-dir" => log_dir = Some(value),
                    _ => overrides.push((arg, value)),
                }
            }
            _ if arg.starts_with("--") => return Err(format!("unknown option {arg}")),
            _ if image.is_none() => image = Some(arg),
            _ => return Err(format!("unexpected argument {arg}")),
        }
    }

    // command-line flags win over the config file
    let mut config = match config_path {
        Some(path) => CaptureConfig::from_file(&path).map_err(|e| e.to_string())?,
        None => CaptureConfig::default(),
    };
    for (flag, value) in overrides {
        match flag.as_str() {
            "--height" => config.height = value.parse().map_err(|_| format!("invalid height '{value}'"))?,
            "--width" => config.width = value.parse().map_err(|_| format!("invalid width '{value}'"))?,
            "--device" => config.device = value.parse().map_err(|e: CaptureError| e.to_string())?,
            "--filter" => {
                config.filter = value
                    .parse()
                    .map_err(|e: grab_image::ImageError| e.to_string())?
            }
            _ => unreachable!(),
        }
    }

    Ok(Args {
        image: image.ok_or_else(|| "missing image path".to_string())?,
        config,
        log_dir,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            init_stdout_logger(default_level());
            log_fatal!("{message}\n{USAGE}");
        }
    };

    match &args.log_dir {
        Some(dir) => init_file_logger(dir, default_level())?,
        None => init_stdout_logger(default_level()),
    }

    let grabber = ScreenCapture::new(args.config)?;
    let mut env = StaticEnvironment::from_file(&args.image)?;
    let tensor = grabber.capture(&mut env)?;

    let flat: Vec<f32> = tensor.flatten_all()?.to_device(&candle_core::Device::Cpu)?.to_vec1()?;
    let min = flat.iter().cloned().fold(f32::INFINITY, f32::min);
    let max = flat.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let mean = flat.iter().sum::<f32>() / flat.len().max(1) as f32;

    info!("captured {} from {}", args.image, DeviceSpec::of(tensor.device()));
    info!("shape {:?} (batch, channels, width, height)", tensor.dims());
    info!("min {min:.4} max {max:.4} mean {mean:.4}");
    Ok(())
}
