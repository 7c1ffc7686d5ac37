//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `charge`: Bader 电荷差
//! - `displace`: 原子位移
//! - `bond`: 最近邻键长
//! - `pdos`: 投影态密度（嵌套子命令）
//!   - `smear`: 高斯展宽
//!   - `plot`: 绘制展宽曲线
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: charge, displace, bond, pdos

pub mod bond;
pub mod charge;
pub mod displace;
pub mod pdos;

use clap::{Parser, Subcommand};

/// qpost - 原子模拟后处理工具
#[derive(Parser)]
#[command(name = "qpost")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Post-processing for Bader charges, atomic displacements, bond distances and CP2K PDOS",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Per-atom Bader charge difference between a reference and a defective structure
    Charge(charge::ChargeArgs),

    /// Per-atom displacement between a reference and a defective .xyz structure
    Displace(displace::DisplaceArgs),

    /// Nearest-neighbour bond distance between two species in an .xyz file
    Bond(bond::BondArgs),

    /// Projected density of states (CP2K .pdos) smearing and plotting
    Pdos(pdos::PdosArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pdos_smear_defaults() {
        let cli = Cli::try_parse_from(["qpost", "pdos", "smear", "W-ALPHA.pdos"]).unwrap();
        match cli.command {
            Commands::Pdos(args) => match args.command {
                pdos::PdosCommands::Smear(s) => {
                    assert_eq!(s.width, 0.10);
                    assert_eq!(s.npts, None);
                    assert_eq!(s.points_per_level, 4);
                }
                _ => panic!("expected smear"),
            },
            _ => panic!("expected pdos"),
        }
    }

    #[test]
    fn test_parse_negative_plot_limits() {
        let cli = Cli::try_parse_from([
            "qpost", "pdos", "plot", "a.dat", "--xlim", "-5", "2.5", "--ylim", "-10", "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Pdos(args) => match args.command {
                pdos::PdosCommands::Plot(p) => {
                    assert_eq!(p.xlim, vec![-5.0, 2.5]);
                    assert_eq!(p.ylim, vec![-10.0, 10.0]);
                }
                _ => panic!("expected plot"),
            },
            _ => panic!("expected pdos"),
        }
    }

    #[test]
    fn test_parse_bond_defaults() {
        let cli = Cli::try_parse_from(["qpost", "bond", "traj.xyz"]).unwrap();
        match cli.command {
            Commands::Bond(b) => {
                assert_eq!(b.center, "W");
                assert_eq!(b.neighbor, "S");
                assert_eq!(b.frame, -1);
            }
            _ => panic!("expected bond"),
        }
    }
}
