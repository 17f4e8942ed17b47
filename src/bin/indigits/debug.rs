use crate::args;
use crate::error::*;

/// Print site debug information
#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum DebugCommands {
    /// Prints the resolved config
    Config {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Lists profiles next to the config
    Profiles {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Lists pages rendered from DIRECT_TEMPLATES and enabled feeds
    Outputs {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },
}

impl DebugCommands {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Config { config } => {
                let config = config.load_config()?;
                print!("{config}");
            }
            Self::Profiles { config } => {
                let config = config.load_config()?;
                for name in indigits::config::profile::list(&config.root)? {
                    println!("{name}");
                }
            }
            Self::Outputs { config } => {
                let config = config.load_config()?;
                let context = indigits::SiteContext::new(config)?;
                for output in context.direct_outputs() {
                    println!("{}: {}", output.template, output.save_as);
                }
                for feed in context.feeds() {
                    println!("{}: {}", feed.kind.key(), feed.path);
                }
            }
        }

        Ok(())
    }
}
