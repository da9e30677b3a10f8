//! End-to-end runs of the pipeline on synthetic station files.

use approx::assert_abs_diff_eq;
use climtrend::{
    analyze, analyze_cached, AnalysisCache, ClimateConfig, ClimateTrends, ErrorKind, FontConfig, Variable,
};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const HEADER: &str = "STATION,ELEMENT,YEAR,MONTH,TIMEFUNCTION,MDFUNCTION,VALUE,FLAG_REPEAT,FLAG_INTERRUPTED";

/// Writes one source file. `value(year, month)` returning `None` leaves the month out.
fn write_source(
    path: &Path,
    element: &str,
    (time_function, aggregation): (&str, &str),
    years: std::ops::RangeInclusive<i32>,
    value: impl Fn(i32, i32) -> Option<String>,
) {
    let mut csv = format!("{}\n", HEADER);
    for year in years {
        for month in 1..=12 {
            if let Some(v) = value(year, month) {
                writeln!(csv, "B2BTUR01,{element},{year},{month},{time_function},{aggregation},{v},,").unwrap();
                // A second aggregation of the same quantity that must be filtered out.
                writeln!(csv, "B2BTUR01,{element},{year},{month},{time_function},MAX,999.9,,").unwrap();
            }
        }
    }
    fs::write(path, csv).unwrap();
}

/// Temperature rises from 10 °C to 12 °C over 2000-2002, wind and precipitation
/// are constant apart from a seasonal cycle.
fn station(dir: &TempDir) -> ClimateConfig {
    let mut config = ClimateConfig::default();
    config.temperature.path = dir.path().join("T.csv");
    config.wind.path = dir.path().join("F.csv");
    config.precipitation.path = dir.path().join("SRA.csv");
    config.fonts = FontConfig {
        directory: dir.path().join("fonts"),
        ..FontConfig::default()
    };

    let seasonal = |month: i32| [-6.0, -4.0, 0.0, 5.0, 10.0, 13.0, 15.0, 14.0, 9.0, 3.0, -2.0, -5.0][(month - 1) as usize];
    write_source(&config.temperature.path, "T", ("AVG", "AVG"), 2000..=2002, |year, month| {
        Some(format!("{}", 10.0 + f64::from(year - 2000) + seasonal(month) - 52.0 / 12.0))
    });
    write_source(&config.wind.path, "F", ("AVG", "AVG"), 2000..=2002, |_, month| {
        Some(format!("{}", 3.0 + if month % 2 == 0 { 0.5 } else { -0.5 }))
    });
    write_source(&config.precipitation.path, "SRA", ("07:00", "SUM"), 2000..=2002, |_, month| {
        Some(format!("{}", 40.0 + f64::from(month)))
    });
    config
}

#[test]
fn test_end_to_end_linear_temperature() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = station(&dir);

    let analysis = analyze(&config)?;

    let years: Vec<i32> = analysis.yearly().iter().map(|r| r.year).collect();
    assert_eq!(years, vec![2000, 2001, 2002]);
    assert_abs_diff_eq!(analysis.yearly()[0].observed.tavg, 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(analysis.yearly()[2].observed.tavg, 12.0, epsilon = 1e-9);
    assert_abs_diff_eq!(analysis.yearly()[1].observed.wspd, 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(analysis.yearly()[1].observed.prcp, 12.0 * 40.0 + 78.0, epsilon = 1e-9);

    assert_abs_diff_eq!(analysis.models().tavg.slope, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(analysis.models().wspd.slope, 0.0, epsilon = 1e-9);

    let predictions = analysis.predict(&[2002]);
    let in_sample = analysis.yearly()[2].trend;
    for variable in Variable::ALL {
        assert_abs_diff_eq!(
            predictions.get(2002).unwrap().predicted(variable),
            in_sample.get(variable),
            epsilon = 1e-9
        );
    }
    Ok(())
}

#[test]
fn test_repeated_runs_are_bit_identical() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = station(&dir);

    let first = analyze(&config)?;
    let second = analyze(&config)?;

    assert_eq!(first, second);
    for variable in Variable::ALL {
        let (a, b) = (first.models().get(variable), second.models().get(variable));
        assert_eq!(a.slope.to_bits(), b.slope.to_bits());
        assert_eq!(a.intercept.to_bits(), b.intercept.to_bits());
    }
    Ok(())
}

#[test]
fn test_incomplete_year_is_excluded() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = station(&dir);
    write_source(&config.temperature.path, "T", ("AVG", "AVG"), 1998..=2002, |_, _| {
        Some("9.0".to_string())
    });
    // Wind misses June 2001; precipitation has an unparsable value in March 2002
    // and a year no other variable covers.
    write_source(&config.wind.path, "F", ("AVG", "AVG"), 1998..=2002, |year, month| {
        ((year, month) != (2001, 6)).then(|| "3.0".to_string())
    });
    write_source(&config.precipitation.path, "SRA", ("07:00", "SUM"), 1998..=2003, |year, month| {
        Some(if (year, month) == (2002, 3) { "--".to_string() } else { "40".to_string() })
    });

    let analysis = analyze(&config)?;

    let years: Vec<i32> = analysis.yearly().iter().map(|r| r.year).collect();
    assert_eq!(years, vec![1998, 1999, 2000]);
    for row in analysis.yearly() {
        assert_abs_diff_eq!(row.observed.prcp, 480.0, epsilon = 1e-9);
    }
    Ok(())
}

#[test]
fn test_single_complete_year_is_insufficient() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = station(&dir);
    write_source(&config.wind.path, "F", ("AVG", "AVG"), 2001..=2001, |_, _| Some("3.0".to_string()));

    let err = analyze(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientData);
    Ok(())
}

#[test]
fn test_no_complete_year_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = station(&dir);
    write_source(&config.temperature.path, "T", ("AVG", "AVG"), 2000..=2002, |_, month| {
        (month != 12).then(|| "9.5".to_string())
    });

    let err = analyze(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoCompleteYears);
    Ok(())
}

#[test]
fn test_missing_source_aborts_before_any_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let mut config = station(&dir);
    config.wind.path = dir.path().join("absent.csv");

    let client = ClimateTrends::new(config);
    let err = client.report().years(vec![2030]).call().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert!(err.to_string().contains("absent.csv"));
    Ok(())
}

#[test]
fn test_source_without_value_column_is_malformed() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = station(&dir);
    fs::write(&config.precipitation.path, "YEAR,MONTH,TIMEFUNCTION,MDFUNCTION\n2000,1,07:00,SUM\n")?;

    let err = analyze(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceMalformed);
    Ok(())
}

#[test]
fn test_unchanged_sources_hit_shared_cache() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = station(&dir);
    let cache = Arc::new(AnalysisCache::new());

    let first = ClimateTrends::with_cache(config.clone(), Arc::clone(&cache)).analyze()?;
    let second = ClimateTrends::with_cache(config.clone(), Arc::clone(&cache)).analyze()?;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    // Rewriting a source with an extra year changes its identity.
    write_source(&config.wind.path, "F", ("AVG", "AVG"), 2000..=2003, |_, _| Some("3.0".to_string()));
    let third = ClimateTrends::with_cache(config, Arc::clone(&cache)).analyze()?;
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(cache.len(), 1);
    Ok(())
}

#[test]
fn test_edited_sources_replace_cached_analysis() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = station(&dir);
    let cache = AnalysisCache::new();

    for last_year in 2003..2008 {
        analyze_cached(&config, &cache)?;
        write_source(&config.wind.path, "F", ("AVG", "AVG"), 2000..=last_year, |_, _| {
            Some("3.0".to_string())
        });
    }

    assert_eq!(cache.len(), 1);
    Ok(())
}

#[test]
fn test_same_length_rewrite_is_recomputed() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = station(&dir);
    let cache = AnalysisCache::new();

    let before = analyze_cached(&config, &cache)?;
    write_source(&config.wind.path, "F", ("AVG", "AVG"), 2000..=2002, |_, month| {
        Some(format!("{}", 5.0 + if month % 2 == 0 { 0.5 } else { -0.5 }))
    });
    let after = analyze_cached(&config, &cache)?;

    assert_abs_diff_eq!(before.yearly()[0].observed.wspd, 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(after.yearly()[0].observed.wspd, 5.0, epsilon = 1e-9);
    assert_eq!(cache.len(), 1);
    Ok(())
}

#[test]
fn test_report_uses_offsets_and_missing_fonts_only_disable_pdf(
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let client = ClimateTrends::new(station(&dir));

    let report = client
        .report()
        .offsets(climtrend::HorizonOffsets::new(10, 100, 1000)?)
        .current_year(2026)
        .call()?;

    let years: Vec<i32> = report.predictions().years().collect();
    assert_eq!(years, vec![2036, 2126, 3026]);
    let far = report.predictions().get(3026).unwrap();
    let model = report.models().tavg;
    assert_eq!(far.predicted.tavg, model.slope * 3026.0 + model.intercept);

    let err = client.pdf(&report).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReportAssetMissing);
    assert!(err.to_string().contains("DejaVuSans.ttf"));

    assert_eq!(report.yearly().len(), 3);
    assert_eq!(client.pdf_file_name(&report), "climate_report_11723_2026.pdf");
    Ok(())
}

#[test]
fn test_duplicate_horizon_years_collapse() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let client = ClimateTrends::new(station(&dir));

    let report = client.report().years(vec![2050, 2040, 2050]).call()?;

    assert_eq!(report.predictions().years().collect::<Vec<_>>(), vec![2050, 2040]);
    Ok(())
}
