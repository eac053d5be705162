use std::path::PathBuf;

use steamworks_loader::config::load_cfg;
use steamworks_loader::loader::discover_extract_location;
use steamworks_loader::{HostInfo, LoaderConfig, Provisioner, ResourceDir, SystemLoader};
use tracing_subscriber::EnvFilter;

struct Args {
    config: Option<PathBuf>,
    resources: Option<PathBuf>,
    folder: Option<String>,
    probe: bool,
    libraries: Vec<String>,
}

fn usage_exit(code: i32) -> ! {
    if code == 0 {
        println!("{}", USAGE_TEXT);
    } else {
        eprintln!("{}", USAGE_TEXT);
    }
    std::process::exit(code);
}

fn parse_args() -> Args {
    let mut args = Args {
        config: None,
        resources: None,
        folder: None,
        probe: false,
        libraries: Vec::new(),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => usage_exit(0),
            "--probe" => args.probe = true,
            "--config" => match iter.next() {
                Some(value) => args.config = Some(PathBuf::from(value)),
                None => usage_exit(1),
            },
            "--resources" => match iter.next() {
                Some(value) => args.resources = Some(PathBuf::from(value)),
                None => usage_exit(1),
            },
            "--folder" => match iter.next() {
                Some(value) => args.folder = Some(value),
                None => usage_exit(1),
            },
            flag if flag.starts_with("--") => {
                eprintln!("[steamworks-loader] Unknown option: {}", flag);
                usage_exit(1);
            }
            _ => args.libraries.push(arg),
        }
    }

    args
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> steamworks_loader::Result<PathBuf> {
    let mut config = match &args.config {
        Some(path) => load_cfg(path),
        None => LoaderConfig::default(),
    };
    if let Some(dir) = args.resources {
        config.resource_dir = Some(dir);
    }
    if let Some(folder) = args.folder {
        config.folder_tag = folder;
    }

    if args.probe {
        return discover_extract_location(config.candidate_locations())
            .map(|location| steamworks_loader::loader::extraction_dir(&location));
    }

    let host = HostInfo::current()?;
    tracing::debug!(platform = %host.platform, is_64bit = host.is_64bit, "detected host");

    let resources = ResourceDir::new(config.resource_dir()?);
    let mut provisioner = Provisioner::new(host, resources, SystemLoader::new());
    let dir = provisioner.load_library(&config, args.libraries.as_slice())?;

    for path in provisioner.loader().loaded() {
        println!("{}", path.display());
    }
    Ok(dir)
}

fn main() {
    init_logging();

    let args = parse_args();
    if args.libraries.is_empty() && !args.probe {
        usage_exit(1);
    }

    match run(args) {
        Ok(dir) => println!("{}", dir.display()),
        Err(e) => {
            eprintln!("[steamworks-loader] {}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("[steamworks-loader]   caused by: {}", cause);
                source = cause.source();
            }
            if let steamworks_loader::Error::Exhausted { secondary, .. } = &e {
                for later in secondary {
                    eprintln!("[steamworks-loader]   later failure: {}", later);
                }
            }
            std::process::exit(1);
        }
    }
}

static USAGE_TEXT: &str = r#"
Usage: steamworks-loader [OPTIONS] <LIBRARY>...

Extracts the bundled native libraries and loads them in the order given
(dependencies first), e.g. `steamworks-loader steam_api steamworks4j`.

Options:
    --config <file>       Read loader settings from a JSON file
    --resources <dir>     Directory containing the bundled natives
    --folder <tag>        Version tag used for the extraction folder
    --probe               Only print the directory natives would be extracted to
    --help                Show this text
"#;
