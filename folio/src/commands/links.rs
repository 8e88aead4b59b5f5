use std::io::Write;

use folio_models::contact::ContactLink;

pub fn print_links(links: &[ContactLink], out: &mut impl Write) -> anyhow::Result<()> {
    let width = links
        .iter()
        .map(|link| link.label.chars().count())
        .max()
        .unwrap_or_default();

    for link in links {
        writeln!(out, "{:width$}  {}", link.label, link.target())?;
    }

    Ok(())
}
