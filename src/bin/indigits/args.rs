use std::env;
use std::io::Write as _;
use std::path;

use indigits::config::Config;

use crate::error::*;

/// Where to find the configuration and what to override once it is loaded
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct ConfigArgs {
    /// Config file to use [default: _indigits.yml]
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<path::PathBuf>,

    /// Profile to load from `_indigits.<NAME>.yml`
    #[arg(short, long, value_name = "NAME", conflicts_with = "config")]
    pub(crate) profile: Option<String>,

    /// Override SITEURL
    #[arg(long, value_name = "URL")]
    pub(crate) site_url: Option<String>,

    /// Generate document-relative URLs
    #[arg(long)]
    pub(crate) relative_urls: bool,
}

impl ConfigArgs {
    pub(crate) fn load_config(&self) -> Result<Config> {
        let mut config = if let Some(config_path) = self.config.as_deref() {
            Config::from_file(config_path).with_context(|| {
                format!("Error reading config file {}", config_path.display())
            })?
        } else {
            let cwd = env::current_dir().context("Failed to read current directory")?;
            Config::from_cwd(cwd, self.profile.as_deref())?
        };

        if let Some(site_url) = self.site_url.as_deref() {
            log::debug!("Overriding config `SITEURL` with `{site_url}`");
            config.set("SITEURL", serde_yaml::Value::String(site_url.to_owned()))?;
        }
        if self.relative_urls {
            log::debug!("Overriding config `RELATIVE_URLS` with `true`");
            config.relative_urls = true;
        }

        Ok(config)
    }
}

pub(crate) fn init_logging(level: Option<log::Level>, colored: bool) {
    let Some(level) = level else {
        return;
    };

    let mut builder = env_logger::Builder::new();
    builder.write_style(if colored {
        env_logger::WriteStyle::Always
    } else {
        env_logger::WriteStyle::Never
    });
    builder.filter(None, level.to_level_filter());

    if level == log::Level::Trace {
        builder.format_timestamp_secs();
    } else {
        builder.format(move |f, record| {
            let style = if colored {
                level_style(record.level())
            } else {
                anstyle::Style::new()
            };
            writeln!(
                f,
                "{style}{}{style:#}: {}",
                record.level(),
                record.args()
            )
        });
    }

    builder.init();
}

fn level_style(level: log::Level) -> anstyle::Style {
    match level {
        log::Level::Error => anstyle::AnsiColor::Red.on_default().bold(),
        log::Level::Warn => anstyle::AnsiColor::Yellow.on_default(),
        log::Level::Info => anstyle::AnsiColor::Green.on_default(),
        log::Level::Debug => anstyle::AnsiColor::Blue.on_default(),
        log::Level::Trace => anstyle::AnsiColor::Cyan.on_default(),
    }
}
