//! commitfs - browse Git history as a read-only filesystem
//!
//! This is the command-line entry point. It mounts one commit as a view and
//! runs a single filesystem call against it.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::debug;

use commitfs::storage::GitRepository;
use commitfs::views::{CallContext, CommitView, FileAttr, FsError, Getattr, MountConfig};

#[derive(Debug)]
enum Command {
    Ls,
    Stat,
    Cat,
    Readlink,
    Access,
}

impl Command {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "ls" => Some(Command::Ls),
            "stat" => Some(Command::Stat),
            "cat" => Some(Command::Cat),
            "readlink" => Some(Command::Readlink),
            "access" => Some(Command::Access),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Options {
    repo: Option<PathBuf>,
    config: MountConfig,
    level: Option<tracing::Level>,
    revision: String,
    command: Command,
    path: String,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Some(options)) => options,
        Ok(None) => return ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Try 'commitfs --help' for more information.");
            return ExitCode::FAILURE;
        }
    };

    setup_tracing(options.level);
    debug!("parsed options: {options:?}");

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<FsError>() {
                Some(fs) => eprintln!("Error: {} (errno {})", fs, fs.errno()),
                None => eprintln!("Error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut repo = None;
    let mut config = MountConfig::default();
    let mut level = Some(tracing::Level::WARN);
    let mut positional = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-r" | "--repo" => {
                i += 1;
                let value = args.get(i).ok_or("--repo needs a path")?;
                repo = Some(PathBuf::from(value));
            }
            "-u" | "--uid" => {
                i += 1;
                config = config.uid(parse_id(args.get(i), "--uid")?);
            }
            "-g" | "--gid" => {
                i += 1;
                config = config.gid(parse_id(args.get(i), "--gid")?);
            }
            "-v" | "--verbose" => {
                level = Some(tracing::Level::DEBUG);
            }
            "-q" | "--quiet" => {
                level = None;
            }
            "-h" | "--help" => {
                print_help();
                return Ok(None);
            }
            "--version" => {
                println!("commitfs v{}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            arg if arg.starts_with('-') && arg != "-" => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => positional.push(arg.to_string()),
        }
        i += 1;
    }

    let mut positional = positional.into_iter();
    let revision = positional.next().ok_or("missing revision")?;
    let command = positional.next().ok_or("missing command")?;
    let command = Command::parse(&command).ok_or_else(|| format!("Unknown command: {}", command))?;
    let path = positional.next().unwrap_or_else(|| "/".to_string());
    if path.is_empty() {
        return Err("PATH must not be empty".to_string());
    }

    if let Some(extra) = positional.next() {
        return Err(format!("Unexpected argument: {}", extra));
    }

    Ok(Some(Options {
        repo,
        config,
        level,
        revision,
        command,
        path,
    }))
}

fn parse_id(value: Option<&String>, flag: &str) -> Result<u32, String> {
    let value = value.ok_or_else(|| format!("{} needs a number", flag))?;
    value
        .parse()
        .map_err(|_| format!("{} needs a number, got '{}'", flag, value))
}

fn setup_tracing(level: Option<tracing::Level>) {
    if let Some(level) = level {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }
}

fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let repo = match &options.repo {
        Some(path) => GitRepository::open(path).map_err(FsError::from)?,
        None => GitRepository::discover(".").map_err(FsError::from)?,
    };

    let view = CommitView::new(Arc::new(repo), options.revision, options.config)?;
    let path = options.path.as_str();

    match options.command {
        Command::Ls => {
            for name in view.readdir(path, 0)? {
                println!("{}", name);
            }
        }
        Command::Stat => match view.getattr(Some(path), None)? {
            Getattr::Found(attr) => print_attr(&view, path, &attr),
            Getattr::NoTarget => println!("nothing to resolve"),
            missing @ Getattr::NotFound(_) => {
                missing.into_reply()?;
            }
        },
        Command::Cat => {
            let data = view.read(path, usize::MAX, 0, 0)?;
            std::io::stdout().write_all(&data)?;
        }
        Command::Readlink => {
            let target = view.readlink(path)?;
            println!("{}", String::from_utf8_lossy(&target));
        }
        Command::Access => {
            let ctx = CallContext::with_relative_path(path);
            view.access(&ctx, path, libc::R_OK)?;
            println!("ok");
        }
    }

    Ok(())
}

fn print_attr(view: &CommitView, path: &str, attr: &FileAttr) {
    let commit = view.commit();
    let kind = if attr.is_dir() {
        "directory"
    } else if attr.is_symlink() {
        "symbolic link"
    } else {
        "regular file"
    };

    println!("  path: {}", path);
    println!("commit: {} ({})", commit.sha1(), commit.timestamp());
    println!("  type: {}", kind);
    println!("  mode: {:o} ({:04o})", attr.st_mode, attr.permissions());
    println!(" nlink: {}", attr.st_nlink);
    println!("   uid: {}", attr.st_uid);
    println!("   gid: {}", attr.st_gid);
    println!(" mtime: {}", attr.st_mtime);
    println!(" ctime: {}", attr.st_ctime);
    if let Some(size) = attr.st_size {
        println!("  size: {}", size);
    }
}

fn print_help() {
    println!("commitfs - browse Git history as a read-only filesystem");
    println!();
    println!("Usage: commitfs [OPTIONS] <REVISION> <COMMAND> [PATH]");
    println!();
    println!("Commands:");
    println!("  ls          List a directory");
    println!("  stat        Show attributes");
    println!("  cat         Print file contents");
    println!("  readlink    Print a symlink target");
    println!("  access      Check that a path exists");
    println!();
    println!("Options:");
    println!("  -r, --repo PATH    Repository to read (default: discovered from .)");
    println!("  -u, --uid UID      Owner to report (default: current user)");
    println!("  -g, --gid GID      Group to report (default: current group)");
    println!("  -v, --verbose      Enable debug logging");
    println!("  -q, --quiet        Disable logging");
    println!("  -h, --help         Show this help message");
    println!("  --version          Show version");
    println!();
    println!("Examples:");
    println!("  commitfs HEAD ls /");
    println!("  commitfs v1.0 stat /src/main.rs");
    println!("  commitfs -r ../other 3f2a9c1 cat /README.md");
}
