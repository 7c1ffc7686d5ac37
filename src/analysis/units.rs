//! # 单位换算常数

/// Bohr -> Å
pub const BOHR_TO_ANGSTROM: f64 = 0.529177;

/// Hartree -> eV
pub const HARTREE_TO_EV: f64 = 27.211386;

/// 将本征值平移到费米能级并换算为 eV
///
/// 输入与费米能级均为 a.u.（Hartree）。
pub fn shift_to_fermi_ev(eigenvalue: f64, fermi_energy: f64) -> f64 {
    (eigenvalue - fermi_energy) * HARTREE_TO_EV
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_to_fermi() {
        assert_eq!(shift_to_fermi_ev(-0.25, -0.25), 0.0);
        assert!((shift_to_fermi_ev(1.0, 0.0) - 27.211386).abs() < 1e-12);
        assert!((shift_to_fermi_ev(-0.3, -0.1) + 0.2 * 27.211386).abs() < 1e-12);
    }
}
