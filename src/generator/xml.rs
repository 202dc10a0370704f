//! XML well-formedness checks for rendered documents.

use anyhow::{Result, bail};
use quick_xml::{Reader, events::Event};

/// Parse `xml` to the end, failing on the first syntax error or on a
/// document without a root element.
pub fn check_well_formed(xml: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;

    let mut depth = 0usize;
    let mut roots = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Empty(_)) if depth == 0 => roots += 1,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => bail!("at byte {}: {e}", reader.error_position()),
        }
    }

    match (roots, depth) {
        (1, 0) => Ok(()),
        (0, _) => bail!("no root element"),
        (_, 0) => bail!("{roots} root elements"),
        _ => bail!("{depth} unclosed elements"),
    }
}
