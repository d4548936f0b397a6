use clap::Parser;
use rqrgen::logger::{self, LogLevel, LoggerConfig};
use rqrgen::{
    ClientConfig, FormSnapshot, GenerationMode, Generator, LocalFile, SocialEntry, SocialFields,
    SocialPlatform, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code for input the form rejects before any network call.
const EXIT_INVALID_INPUT: u8 = 2;

fn parse_mode(name: &str) -> Result<GenerationMode, String> {
    GenerationMode::from_name(name)
        .ok_or_else(|| format!("unknown mode '{}' (text, url, social, image)", name))
}

#[derive(Debug, Parser)]
#[command(name = "rqrgen", about = "Generate a QR code through the QR rendering service")]
struct Cli {
    /// text, url, social or image
    #[arg(long, default_value = "text", value_parser = parse_mode)]
    mode: GenerationMode,

    #[arg(long, default_value = "")]
    text: String,

    #[arg(long, default_value = "")]
    url: String,

    #[arg(long)]
    facebook: Option<String>,

    #[arg(long)]
    twitter: Option<String>,

    #[arg(long)]
    instagram: Option<String>,

    #[arg(long)]
    linkedin: Option<String>,

    /// Image already reachable by URL
    #[arg(long, default_value = "")]
    image_url: String,

    /// Local image, uploaded when no --image-url is given
    #[arg(long)]
    file: Option<PathBuf>,

    #[arg(long)]
    size: Option<i64>,

    /// classic, indigo, sunset, forest, midnight or custom
    #[arg(long, default_value = "classic")]
    theme: String,

    #[arg(long, default_value = DEFAULT_FOREGROUND)]
    fg: String,

    #[arg(long, default_value = DEFAULT_BACKGROUND)]
    bg: String,

    /// Overrides QR_API_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long)]
    retries: Option<u32>,

    #[arg(short, long, default_value = "qr.png")]
    output: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn social_fields(&self) -> SocialFields {
        let mut fields = SocialFields::new();
        for (platform, value) in [
            (SocialPlatform::Facebook, &self.facebook),
            (SocialPlatform::Twitter, &self.twitter),
            (SocialPlatform::Instagram, &self.instagram),
            (SocialPlatform::Linkedin, &self.linkedin),
        ] {
            if let Some(value) = value {
                fields = fields.with(platform, SocialEntry::enabled(value.clone()));
            }
        }
        fields
    }

    fn form(&self) -> std::io::Result<FormSnapshot> {
        let mut form = FormSnapshot::new(self.mode)
            .with_text(self.text.clone())
            .with_url(self.url.clone())
            .with_social(self.social_fields())
            .with_image_url(self.image_url.clone())
            .with_theme(self.theme.clone())
            .with_colors(self.fg.clone(), self.bg.clone());

        if let Some(size) = self.size {
            form = form.with_size(size);
        }
        if let Some(path) = &self.file {
            form = form.with_file(LocalFile::from_path(path)?);
        }
        Ok(form)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let dotenv_loaded = dotenv::dotenv().is_ok();

    let level = LogLevel::from_name(&cli.log_level).unwrap_or(LogLevel::Info);
    let logger_config = if cli.json_logs {
        LoggerConfig::production().with_level(level)
    } else {
        LoggerConfig::new().with_level(level)
    };
    if let Err(e) = logger::init_with_config(logger_config) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_validation() => {
            log::warn!("⚠️ {}", e);
            ExitCode::from(EXIT_INVALID_INPUT)
        }
        Err(e) => {
            log::error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> rqrgen::Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(retries) = cli.retries {
        config.max_retries = Some(retries);
    }
    logger::log_config_info(&config);

    let form = cli.form()?;
    let generator = Generator::from_config(&config)?;

    generator.generate(&form).await?;
    let info = generator.save_preview(&cli.output)?;

    println!("{}", cli.output.display());
    log::info!(
        "💾 Saved {} ({} bytes, {})",
        cli.output.display(),
        info.size_bytes,
        info.content_type
    );
    Ok(())
}
