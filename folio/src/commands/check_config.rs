use std::io::Write;

use folio_config::Config;

use crate::environment;

pub fn check_config(config: &Config, verbose: bool, out: &mut impl Write) -> anyhow::Result<()> {
    if verbose {
        writeln!(out, "{config:#?}")?;
    }

    if environment::contact_service_config(&config.contact).is_local_preview() {
        writeln!(
            out,
            "No form relay access key configured, running in local preview mode"
        )?;
    }

    Ok(())
}
