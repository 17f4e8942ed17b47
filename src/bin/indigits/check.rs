use crate::args;
use crate::error::*;

/// Load the configuration and report whether it is valid
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct CheckArgs {
    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl CheckArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_config()?;
        let profile = config.profile.clone();
        let extra = config.extra.len();
        let context = indigits::SiteContext::new(config)?;

        println!(
            "Profile `{profile}` is valid ({} settings)",
            context.globals().len()
        );
        if extra != 0 {
            log::info!("{extra} unrecognized settings were passed through unchecked");
        }

        Ok(())
    }
}
