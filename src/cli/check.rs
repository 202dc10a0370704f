//! `check` command: verify the rendered documents and the sample library.
//!
//! - Feed and sitemap render and parse as well-formed XML
//! - Sprite labels are unique, and those of pitched instruments parse as
//!   pitch names
//! - Every sprite region ends within the decoded duration of its asset

use crate::{
    cli::CheckArgs,
    config::SiteConfig,
    generator::{feed::render_feed, sitemap::render_sitemap, xml::check_well_formed},
    log,
    logger::{status_error, status_success, status_warning},
    samples::{
        Instrument, LIBRARY, Pitch, SampleLibrary, StaffType,
        probe::{check_bounds, probe_duration_ms},
    },
    utils::plural_count,
};
use anyhow::{Result, bail};
use std::path::Path;

/// Outcome of one check.
#[derive(Debug)]
enum Outcome {
    Pass(String),
    Fail { summary: String, detail: String },
    Skip(String),
}

impl Outcome {
    fn fail(summary: impl Into<String>, detail: impl ToString) -> Self {
        Self::Fail {
            summary: summary.into(),
            detail: detail.to_string(),
        }
    }
}

/// Collected check results.
#[derive(Debug, Default)]
struct CheckReport {
    outcomes: Vec<Outcome>,
}

impl CheckReport {
    fn push(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Fail { .. }))
            .count()
    }

    fn print(&self, warn_only: bool) {
        for outcome in &self.outcomes {
            match outcome {
                Outcome::Pass(message) => status_success(message),
                Outcome::Skip(message) => status_warning(message),
                Outcome::Fail { summary, detail } if warn_only => {
                    status_warning(&format!("{summary}: {detail}"));
                }
                Outcome::Fail { summary, detail } => status_error(summary, detail),
            }
        }
    }
}

/// Run all checks.
pub fn run_check(args: &CheckArgs, config: &SiteConfig) -> Result<()> {
    let instruments = select_instruments(&LIBRARY, args.instrument.as_deref())?;
    let report = collect(config, &instruments, args.check_assets());
    report.print(args.warn_only);

    let failures = report.failures();
    if failures == 0 {
        log!("check"; "all {} passed", plural_count(report.outcomes.len(), "check"));
        return Ok(());
    }

    let summary = format!("{} failed", plural_count(failures, "check"));
    if args.warn_only {
        log!("warning"; "{summary}");
        Ok(())
    } else {
        bail!("check failed: {summary}")
    }
}

/// Every instrument of `library`, or only the one called `name`.
fn select_instruments<'a>(
    library: &'a SampleLibrary,
    name: Option<&str>,
) -> Result<Vec<&'a Instrument>> {
    let Some(name) = name else {
        return Ok(library.iter().collect());
    };
    match library.instrument(name) {
        Some(instrument) => Ok(vec![instrument]),
        None => {
            let known: Vec<&str> = library.iter().map(|i| i.name).collect();
            bail!("unknown instrument `{name}` (known: {})", known.join(", "))
        }
    }
}

fn collect(config: &SiteConfig, instruments: &[&Instrument], check_assets: bool) -> CheckReport {
    let mut report = CheckReport::default();

    if config.site.feed.enable {
        report.push(check_document("feed", render_feed(config)));
    }
    if config.site.sitemap.enable {
        report.push(check_document("sitemap", Ok(render_sitemap(config))));
    }

    let samples_dir = config.samples_dir();
    for &instrument in instruments {
        if instrument.staff_type == StaffType::Normal {
            report.push(check_labels(instrument));
        }
        if check_assets {
            report.push(check_asset(instrument, &samples_dir));
        }
    }

    report
}

fn check_document(name: &str, rendered: Result<String>) -> Outcome {
    let xml = match rendered {
        Ok(xml) => xml,
        Err(e) => return Outcome::fail(format!("{name} failed to render"), format!("{e:#}")),
    };

    match check_well_formed(&xml) {
        Ok(()) => Outcome::Pass(format!("{name} is well-formed XML")),
        Err(e) => Outcome::fail(format!("{name} is not well-formed"), e),
    }
}

fn check_labels(instrument: &Instrument) -> Outcome {
    // A label whose lookup lands on another sprite is shadowed by an earlier one.
    let duplicated: Vec<&str> = instrument
        .sprites
        .iter()
        .filter(|sprite| {
            !instrument
                .region(sprite.label)
                .is_some_and(|region| std::ptr::eq(region, &sprite.region))
        })
        .map(|sprite| sprite.label)
        .collect();

    if !duplicated.is_empty() {
        return Outcome::fail(
            format!("{}: duplicate sprite labels", instrument.name),
            duplicated.join(", "),
        );
    }

    let invalid: Vec<String> = instrument
        .sprites
        .iter()
        .filter_map(|sprite| {
            sprite
                .label
                .parse::<Pitch>()
                .err()
                .map(|e| format!("{}: {e}", sprite.label))
        })
        .collect();

    if !invalid.is_empty() {
        return Outcome::fail(
            format!("{}: invalid pitch labels", instrument.name),
            invalid.join(", "),
        );
    }

    let pitched = instrument.sprites_by_pitch();
    let range = match (pitched.first(), pitched.last()) {
        (Some((low, _)), Some((high, _))) => format!(" ({low}..{high})"),
        _ => String::new(),
    };
    Outcome::Pass(format!(
        "{}: {} named by pitch{range}",
        instrument.name,
        plural_count(instrument.sprites.len(), "sprite")
    ))
}

fn check_asset(instrument: &Instrument, samples_dir: &Path) -> Outcome {
    let path = samples_dir.join(instrument.asset);
    if !path.is_file() {
        return Outcome::Skip(format!(
            "{}: asset {} not found, bounds not checked",
            instrument.name,
            path.display()
        ));
    }

    let asset_ms = match probe_duration_ms(&path) {
        Ok(ms) => ms,
        Err(e) => return Outcome::fail(format!("{}: cannot probe {}", instrument.name, path.display()), e),
    };

    let issues = check_bounds(instrument, asset_ms);
    if issues.is_empty() {
        Outcome::Pass(format!(
            "{}: all sprites within {:.0} ms of {}",
            instrument.name, asset_ms, instrument.asset
        ))
    } else {
        let detail = issues
            .iter()
            .map(|(label, issue)| format!("{label}: {issue}"))
            .collect::<Vec<_>>()
            .join(", ");
        Outcome::fail(
            format!(
                "{}: {} out of bounds",
                instrument.name,
                plural_count(issues.len(), "sprite")
            ),
            detail,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::Sprite;

    const SPRITES: &[Sprite] = &[Sprite::new("C4", 0.0, 500.0), Sprite::new("D4", 500.0, 400.0)];
    const BAD_LABELS: &[Sprite] = &[Sprite::new("C4", 0.0, 500.0), Sprite::new("Hsharp4", 500.0, 10.0)];

    static TEST_LIBRARY: SampleLibrary = SampleLibrary {
        instruments: &[Instrument {
            name: "Test",
            staff_type: StaffType::Normal,
            asset: "test.wav",
            sprites: SPRITES,
        }],
    };

    fn test_instruments() -> Vec<&'static Instrument> {
        select_instruments(&TEST_LIBRARY, None).unwrap()
    }

    fn write_wav(path: &Path, frames: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for _ in 0..frames {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn config_with_public(public: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.build.public = public.to_path_buf();
        config
    }

    #[test]
    fn test_documents_pass() {
        let report = collect(&SiteConfig::default(), &[], false);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.failures(), 0);
    }

    #[test]
    fn test_bad_origin_fails_feed() {
        let mut config = SiteConfig::default();
        config.site.info.url = "nope".into();
        let report = collect(&config, &[], false);
        assert_eq!(report.failures(), 1);
    }

    #[test]
    fn test_invalid_labels_reported() {
        let instrument = Instrument {
            name: "Bad",
            staff_type: StaffType::Normal,
            asset: "bad.wav",
            sprites: BAD_LABELS,
        };
        let Outcome::Fail { detail, .. } = check_labels(&instrument) else {
            panic!("expected failure");
        };
        assert!(detail.contains("Hsharp4"));
    }

    #[test]
    fn test_duplicate_labels_reported() {
        const DUPLICATED: &[Sprite] = &[
            Sprite::new("C4", 0.0, 500.0),
            Sprite::new("D4", 500.0, 400.0),
            Sprite::new("C4", 900.0, 400.0),
        ];
        let instrument = Instrument {
            name: "Twice",
            staff_type: StaffType::Normal,
            asset: "twice.wav",
            sprites: DUPLICATED,
        };
        let Outcome::Fail { summary, detail } = check_labels(&instrument) else {
            panic!("expected failure");
        };
        assert!(summary.contains("duplicate"));
        assert_eq!(detail, "C4");
    }

    #[test]
    fn test_select_instruments_by_name() {
        let selected = select_instruments(&LIBRARY, Some("Piano")).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Piano");

        assert_eq!(select_instruments(&LIBRARY, None).unwrap().len(), LIBRARY.instruments.len());

        let err = select_instruments(&LIBRARY, Some("Tuba")).unwrap_err().to_string();
        assert!(err.contains("Tuba"));
        assert!(err.contains("Piano"));
    }

    #[test]
    fn test_label_check_reports_range() {
        let piano = LIBRARY.instrument("Piano").unwrap();
        let Outcome::Pass(message) = check_labels(piano) else {
            panic!("expected pass");
        };
        assert_eq!(message, "Piano: 17 sprites named by pitch (C3..E4)");
    }

    #[test]
    fn test_asset_within_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let samples = dir.path().join("sounds");
        std::fs::create_dir_all(&samples).unwrap();
        write_wav(&samples.join("test.wav"), 8000);

        let report = collect(&config_with_public(dir.path()), &test_instruments(), true);
        assert_eq!(report.failures(), 0);
        assert!(report.outcomes.iter().all(|o| matches!(o, Outcome::Pass(_))));
    }

    #[test]
    fn test_short_asset_fails_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let samples = dir.path().join("sounds");
        std::fs::create_dir_all(&samples).unwrap();
        // 0.5 s asset, D4 ends at 900 ms
        write_wav(&samples.join("test.wav"), 4000);

        let report = collect(&config_with_public(dir.path()), &test_instruments(), true);
        assert_eq!(report.failures(), 1);
    }

    #[test]
    fn test_missing_asset_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let report = collect(&config_with_public(dir.path()), &test_instruments(), true);

        assert_eq!(report.failures(), 0);
        assert!(report.outcomes.iter().any(|o| matches!(o, Outcome::Skip(_))));
    }

    #[test]
    fn test_warn_only_downgrades_failures() {
        let mut config = SiteConfig::default();
        config.site.info.url = "nope".into();
        config.build.public = tempfile::tempdir().unwrap().path().to_path_buf();

        let mut args = CheckArgs {
            site_url: None,
            instrument: None,
            assets: Some(false),
            warn_only: true,
        };
        assert!(run_check(&args, &config).is_ok());

        args.warn_only = false;
        assert!(run_check(&args, &config).is_err());
    }
}
