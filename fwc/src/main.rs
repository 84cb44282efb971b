use color_print::cprintln;
use fwc::{Config, DuplicatePolicy, Error};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Header file with sequence definitions
    input: String,

    /// Firmware file to create
    output: String,

    /// YAML config file
    #[clap(short, long)]
    config: Option<String>,

    /// Marker in front of every sequence name [default: EVT_]
    #[clap(long)]
    prefix: Option<String>,

    /// Keyword introducing a macro [default: #define]
    #[clap(long)]
    keyword: Option<String>,

    /// Handling of repeated macros and sequence ids: reject or override
    #[clap(long)]
    duplicates: Option<DuplicatePolicy>,

    /// Dump the written firmware
    #[clap(short, long)]
    dump: bool,

    /// Do not print the device tree example
    #[clap(short, long)]
    quiet: bool,
}

impl Args {
    /// File a diagnostic points at
    fn location<'a>(&'a self, err: &'a Error) -> &'a str {
        if let Some(path) = err.path() {
            return path;
        }
        match err {
            Error::InvalidSetting(_) => self.config.as_deref().unwrap_or("<command line>"),
            Error::Verify(_) => &self.output,
            _ => &self.input,
        }
    }

    fn config(&self) -> Result<Config, Error> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(keyword) = &self.keyword {
            config.keyword = keyword.clone();
        }
        if let Some(duplicates) = self.duplicates {
            config.duplicates = duplicates;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    use clap::Parser;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.print_diag(args.location(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let config = args.config()?;
    println!("Realtek Otto SerDes Firmware Compiler");

    println!("1. Read Source");
    println!("  < {}", args.input);
    let source = fwc::read_source(&args.input)?;

    println!("2. Compile");
    let compiled = fwc::compile(&source, &config)?;
    for msg in &compiled.msgs {
        msg.print(&args.input);
    }
    println!(
        "  - {} sequences, {} bytes",
        compiled.sequences.len(),
        compiled.image.len()
    );

    println!("3. Write Firmware");
    println!("  > {}", args.output);
    fwc::write_image(&args.output, &compiled.image)?;

    if args.dump {
        let firmware = fw::Firmware::decode(&compiled.image)?;
        fwc::print_dump(&firmware);
    }

    cprintln!(
        "<g,s>Created Realtek RTL83xx/RTL93xx firmware file</> {}",
        args.output
    );
    if !args.quiet {
        let name = Path::new(&args.output)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| args.output.clone());
        println!("Example for DTS inclusion");
        println!();
        println!("{}", config.dts.snippet(&name));
    }
    Ok(())
}
