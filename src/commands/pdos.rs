//! # pdos 子命令实现
//!
//! ## 功能
//! - `smear`: 读取 CP2K .pdos，构建离散谱（费米能级平移 + eV 换算），
//!   高斯展宽后写出两列 .dat；可选输出所有曲线之和
//! - `plot`: 绘制 .dat 曲线，自旋向下通道取反
//!
//! ## 依赖关系
//! - 使用 `cli/pdos.rs` 定义的参数
//! - 使用 `batch/` 收集与处理文件
//! - 使用 `parsers/pdos.rs`, `parsers/dat.rs`, `analysis/smearing.rs`
//! - 使用 `export/dat.rs`, `plot/dos.rs`

use crate::analysis::smearing::{self, SmearingParams};
use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::pdos::{PdosArgs, PdosCommands, PlotArgs, SmearArgs};
use crate::error::{QpostError, Result};
use crate::export;
use crate::models::SmearedCurve;
use crate::parsers::{dat, pdos};
use crate::plot::{dos, DosPlotStyle, LabeledCurve};
use crate::utils::{output, progress};

use std::fs;
use std::path::{Path, PathBuf};

/// 执行 pdos 命令
pub fn execute(args: PdosArgs) -> Result<()> {
    match args.command {
        PdosCommands::Smear(smear_args) => execute_smear(smear_args),
        PdosCommands::Plot(plot_args) => execute_plot(plot_args),
    }
}

// ─────────────────────────────────────────────────────────────
// smear
// ─────────────────────────────────────────────────────────────

/// 展宽配置
struct SmearConfig {
    width: f64,
    npts: Option<usize>,
    points_per_level: usize,
    orbitals: Option<Vec<String>>,
    output_dir: Option<PathBuf>,
    overwrite: bool,
}

/// 单个文件的展宽产物
struct SmearOutcome {
    input: PathBuf,
    output: PathBuf,
    atom_kind: String,
    levels: usize,
    occupied: usize,
    curve: SmearedCurve,
}

fn execute_smear(args: SmearArgs) -> Result<()> {
    output::print_header("PDOS Gaussian Smearing");

    // 提前校验宽度
    SmearingParams::new(0, args.width)?;

    let files = FileCollector::new(args.inputs.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        return Err(QpostError::NoFilesFound {
            pattern: args.pattern.clone(),
        });
    }

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir).map_err(|e| QpostError::FileWriteError {
            path: dir.display().to_string(),
            source: e,
        })?;
    }

    output::print_info(&format!(
        "Smearing width: {:.3} eV, grid: {}",
        args.width,
        match args.npts {
            Some(n) => format!("{} points", n),
            None => format!("{} x number of eigenvalues", args.points_per_level),
        }
    ));
    if let Some(orbitals) = &args.orbitals {
        output::print_info(&format!("Summing orbitals: {}", orbitals.join(", ")));
    }

    let config = SmearConfig {
        width: args.width,
        npts: args.npts,
        points_per_level: args.points_per_level,
        orbitals: args.orbitals.clone(),
        output_dir: args.output_dir.clone(),
        overwrite: args.overwrite,
    };

    let runner = if files.len() > 1 {
        BatchRunner::new("Smearing")
    } else {
        BatchRunner::new("Smearing").quiet()
    };
    let result = runner.run(&files, |file| process_pdos_file(file, &config));

    for msg in &result.skipped {
        output::print_skip(msg);
    }
    for outcome in &result.outputs {
        output::print_written(
            &outcome.input.display().to_string(),
            &format!(
                "{} ({}, {} levels / {} occupied -> {} points)",
                outcome.output.display(),
                outcome.atom_kind,
                outcome.levels,
                outcome.occupied,
                outcome.curve.len()
            ),
        );
    }
    for (path, err) in &result.failures {
        output::print_error(&format!("Error processing {}: {}", path, err));
    }

    output::print_separator();
    output::print_success(&format!(
        "Smearing complete: {} files, {} written, {} skipped, {} failed",
        result.total(),
        result.outputs.len(),
        result.skipped.len(),
        result.failures.len()
    ));

    if let Some(sum_path) = &args.sum {
        let inputs = sum_inputs(&files, config.output_dir.as_deref(), &result.failures);
        for path in &inputs {
            if !result.outputs.iter().any(|o| &o.output == path) {
                output::print_info(&format!("Including existing output {}", path.display()));
            }
        }

        // 统一从 .dat 读取，保证所有曲线的网格精度一致
        let curves = inputs
            .iter()
            .map(|p| dat::parse_dat_file(p))
            .collect::<Result<Vec<_>>>()?;
        let refs: Vec<&SmearedCurve> = curves.iter().collect();
        match sum_curves(&refs)? {
            Some(total) => {
                export::dat::curve_to_dat(&total, sum_path)?;
                output::print_success(&format!(
                    "Sum of {} curves saved to '{}'",
                    refs.len(),
                    sum_path.display()
                ));
            }
            None => output::print_warning("No smeared curves to sum"),
        }
    }

    Ok(())
}

/// 处理单个 .pdos 文件
fn process_pdos_file(input: &PathBuf, config: &SmearConfig) -> ProcessResult<SmearOutcome> {
    if !has_extension(input, "pdos") {
        return ProcessResult::Skipped(format!(
            "Skipping {}: not a .pdos file",
            input.display()
        ));
    }

    let output_path = output_path_for(input, config.output_dir.as_deref());
    if output_path.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_path.display()
        ));
    }

    match smear_file(input, &output_path, config) {
        Ok(outcome) => ProcessResult::Success(outcome),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

fn smear_file(input: &Path, output_path: &Path, config: &SmearConfig) -> Result<SmearOutcome> {
    let data = pdos::parse_pdos_file(input)?;
    let spectrum = data.to_spectrum(config.orbitals.as_deref())?;
    let params = SmearingParams::for_spectrum(
        &spectrum,
        config.npts,
        config.points_per_level,
        config.width,
    )?;
    let curve = smearing::smear_with(&spectrum, &params)?;

    export::dat::curve_to_dat(&curve, output_path)?;

    let occupied = data.occupied_count();
    Ok(SmearOutcome {
        input: input.to_path_buf(),
        output: output_path.to_path_buf(),
        atom_kind: data.atom_kind,
        levels: spectrum.len(),
        occupied,
        curve,
    })
}

/// 输出路径：`<stem>.dat`，位于 output_dir 或输入文件旁
fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            dir.join(format!("{}.dat", stem))
        }
        None => input.with_extension("dat"),
    }
}

/// 参与求和的 .dat：本次写出的与因已存在而跳过的，不含处理失败的输入
fn sum_inputs(
    files: &[PathBuf],
    output_dir: Option<&Path>,
    failures: &[(String, String)],
) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|f| has_extension(f, "pdos"))
        .filter(|f| {
            let name = f.display().to_string();
            !failures.iter().any(|(p, _)| *p == name)
        })
        .map(|f| output_path_for(f, output_dir))
        .filter(|p| p.exists())
        .collect()
}

/// 所有曲线逐点相加，网格不一致时报错
fn sum_curves(curves: &[&SmearedCurve]) -> Result<Option<SmearedCurve>> {
    let Some((first, rest)) = curves.split_first() else {
        return Ok(None);
    };

    let mut total = (*first).clone();
    for curve in rest {
        total = smearing::add_curves(&total, curve)?;
    }
    Ok(Some(total))
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

// ─────────────────────────────────────────────────────────────
// plot
// ─────────────────────────────────────────────────────────────

fn execute_plot(args: PlotArgs) -> Result<()> {
    output::print_header("PDOS Plot");

    let x_range = parse_limits(&args.xlim, "xlim")?;
    let y_range = parse_limits(&args.ylim, "ylim")?;

    for beta in &args.beta {
        if !args.files.contains(beta) {
            return Err(QpostError::InvalidArgument(format!(
                "--beta file '{}' is not among the files to plot",
                beta.display()
            )));
        }
    }

    let mut curves = Vec::new();
    for file in &args.files {
        if !has_extension(file, "dat") {
            output::print_skip(&format!("Skipping non-dat file: {}", file.display()));
            continue;
        }
        if !file.exists() {
            output::print_warning(&format!("File not found: {}", file.display()));
            continue;
        }

        let curve = dat::parse_dat_file(file)?;
        if curve.is_empty() {
            output::print_warning(&format!("No data in {}, skipped", file.display()));
            continue;
        }
        let is_beta = args.beta.contains(file) || (args.auto_beta && is_beta_filename(file));
        let curve = if is_beta {
            output::print_info(&format!("Negating DOS of {} (spin down)", file.display()));
            curve.negated()
        } else {
            curve
        };

        curves.push(LabeledCurve {
            label: curve_label(file),
            curve,
        });
    }

    if curves.is_empty() {
        output::print_warning("No .dat files to plot.");
        return Ok(());
    }

    let style = DosPlotStyle {
        width: args.width,
        height: args.height,
        x_range,
        y_range,
        title: args.title.clone(),
    };

    let spinner = progress::create_spinner("Rendering PDOS plot");
    let result = dos::generate_dos_plot(&curves, &args.output, &style);
    spinner.finish_and_clear();
    result?;

    output::print_success(&format!(
        "Plotted {} curves to '{}'",
        curves.len(),
        args.output.display()
    ));

    Ok(())
}

/// 校验坐标轴范围 [min, max]
fn parse_limits(values: &[f64], name: &str) -> Result<(f64, f64)> {
    match values {
        [min, max] if min.is_finite() && max.is_finite() && min < max => Ok((*min, *max)),
        _ => Err(QpostError::InvalidArgument(format!(
            "--{} expects MIN MAX with MIN < MAX, got {:?}",
            name, values
        ))),
    }
}

/// 文件名包含 BETA（忽略大小写）
fn is_beta_filename(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_uppercase().contains("BETA"))
        .unwrap_or(false)
}

/// 图例标签：文件名第一个 '.' 之前的部分
fn curve_label(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .unwrap_or("curve")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::spectrum::EnergyPoint;

    fn curve(points: &[(f64, f64)], npts: usize) -> SmearedCurve {
        let spectrum = points
            .iter()
            .map(|(e, w)| EnergyPoint::new(*e, *w))
            .collect();
        smearing::smear(&spectrum, npts, 0.1).unwrap()
    }

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("run/W-ALPHA_k1-1.pdos"), None),
            PathBuf::from("run/W-ALPHA_k1-1.dat")
        );
        assert_eq!(
            output_path_for(Path::new("run/W-ALPHA_k1-1.pdos"), Some(Path::new("out"))),
            PathBuf::from("out/W-ALPHA_k1-1.dat")
        );
    }

    #[test]
    fn test_sum_curves() {
        let a = curve(&[(-1.0, 1.0), (1.0, 1.0)], 21);
        let b = curve(&[(-1.0, 2.0), (1.0, 0.5)], 21);

        let total = sum_curves(&[&a, &b]).unwrap().unwrap();
        for ((x, y), z) in a.densities().iter().zip(b.densities()).zip(total.densities()) {
            assert!((x + y - z).abs() < 1e-12);
        }

        assert!(sum_curves(&[]).unwrap().is_none());

        let c = curve(&[(-2.0, 1.0), (1.0, 1.0)], 21);
        assert!(sum_curves(&[&a, &c]).is_err());
    }

    #[test]
    fn test_sum_inputs_include_existing_outputs() {
        let dir = std::env::temp_dir().join(format!("qpost_sum_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let fresh = dir.join("W.pdos");
        let existing = dir.join("S.pdos");
        let failed = dir.join("Mo.pdos");
        for stem in ["W", "S", "Mo"] {
            fs::write(dir.join(format!("{}.dat", stem)), "0.0     1.0\n").unwrap();
        }

        let files = vec![fresh.clone(), existing.clone(), failed.clone(), dir.join("notes.txt")];
        let failures = vec![(failed.display().to_string(), "bad".to_string())];
        let inputs = sum_inputs(&files, None, &failures);

        fs::remove_dir_all(&dir).ok();
        assert_eq!(inputs, vec![dir.join("W.dat"), dir.join("S.dat")]);
    }

    #[test]
    fn test_beta_filename_and_label() {
        assert!(is_beta_filename(Path::new("dir/W-beta_k1-1.dat")));
        assert!(!is_beta_filename(Path::new("beta/W-ALPHA_k1-1.dat")));
        assert_eq!(curve_label(Path::new("dir/W-ALPHA_k1-1.dat")), "W-ALPHA_k1-1");
        assert_eq!(curve_label(Path::new("S.smeared.dat")), "S");
    }

    #[test]
    fn test_parse_limits() {
        assert_eq!(parse_limits(&[-3.0, 4.0], "xlim").unwrap(), (-3.0, 4.0));
        assert!(parse_limits(&[4.0, -3.0], "xlim").is_err());
        assert!(parse_limits(&[1.0], "xlim").is_err());
    }

    #[test]
    fn test_skip_non_pdos_input() {
        let config = SmearConfig {
            width: 0.1,
            npts: None,
            points_per_level: 4,
            orbitals: None,
            output_dir: None,
            overwrite: false,
        };
        assert!(matches!(
            process_pdos_file(&PathBuf::from("notes.txt"), &config),
            ProcessResult::Skipped(_)
        ));
    }
}
