//! The six rule predicates.
//!
//! Each predicate first assigns roles from the two components' category slugs
//! (which one is the CPU, which one the motherboard, ...). When the pair does
//! not fit the predicate's role pair, it returns a green pass-through, so a
//! rule stored between two categories is harmless if invoked on anything else.
//! Role assignment looks at both orders, which makes every predicate symmetric.

use crate::catalog::{Component, RuleKind, display_number, display_value};
use crate::compat::verdict::Verdict;
use tracing::warn;

/// PSU wattage must reach this multiple of GPU TDP.
pub const POWER_HEADROOM: f64 = 1.5;

/// Evaluate a single rule against a pair.
pub fn evaluate_rule(kind: &RuleKind, first: &Component, second: &Component) -> Verdict {
    match kind {
        RuleKind::SocketMatch => socket_match(first, second),
        RuleKind::GpuLengthFit => gpu_length_fit(first, second),
        RuleKind::CoolerHeightFit => cooler_height_fit(first, second),
        RuleKind::PsuLengthFit => psu_length_fit(first, second),
        RuleKind::PowerRequirement => power_requirement(first, second),
        RuleKind::FormFactorMatch => form_factor_match(first, second),
        RuleKind::Unknown(name) => {
            warn!(rule = %name, "unknown rule type; passing through");
            Verdict::pass(name.as_str(), format!("Unknown rule type: {name}"))
        }
    }
}

/// `(role1, role2)` ordering of the pair, or `None` when the pair does not
/// consist of exactly those roles.
fn assign_roles<'a>(
    first: &'a Component,
    second: &'a Component,
    role1: &str,
    role2: &str,
) -> Option<(&'a Component, &'a Component)> {
    let (a, b) = if first.is_in(role1) {
        (first, second)
    } else if second.is_in(role1) {
        (second, first)
    } else {
        return None;
    };
    b.is_in(role2).then_some((a, b))
}

fn not_applicable(kind: RuleKind, pair_label: &str) -> Verdict {
    Verdict::pass(kind.as_str(), format!("Not a {pair_label} pair"))
}

pub fn socket_match(first: &Component, second: &Component) -> Verdict {
    let kind = RuleKind::SocketMatch;
    let Some((cpu, board)) = assign_roles(first, second, "cpu", "motherboard") else {
        return not_applicable(kind, "CPU-motherboard");
    };

    let cpu_socket = cpu.specs.socket();
    let board_socket = board.specs.socket();
    if cpu_socket == board_socket {
        Verdict::pass(
            kind.as_str(),
            format!("Socket match: {}", display_value(cpu_socket)),
        )
    } else {
        Verdict::fail(
            kind.as_str(),
            format!(
                "Socket mismatch: CPU {} vs Motherboard {}",
                display_value(cpu_socket),
                display_value(board_socket)
            ),
        )
    }
}

pub fn gpu_length_fit(first: &Component, second: &Component) -> Verdict {
    let kind = RuleKind::GpuLengthFit;
    let Some((gpu, case)) = assign_roles(first, second, "gpu", "case") else {
        return not_applicable(kind, "GPU-case");
    };

    let length = gpu.specs.length_mm();
    let limit = case.specs.max_gpu_length_mm();
    let (length_text, limit_text) = (display_number(length), display_number(limit));
    if length <= limit {
        Verdict::pass(
            kind.as_str(),
            format!("GPU fits: {length_text}mm <= {limit_text}mm"),
        )
    } else {
        Verdict::fail(
            kind.as_str(),
            format!("GPU too long: {length_text}mm > {limit_text}mm"),
        )
    }
}

pub fn cooler_height_fit(first: &Component, second: &Component) -> Verdict {
    let kind = RuleKind::CoolerHeightFit;
    let Some((cooler, case)) = assign_roles(first, second, "cooler", "case") else {
        return not_applicable(kind, "cooler-case");
    };

    let height = cooler.specs.height_mm();
    let limit = case.specs.max_cooler_height_mm();
    let (height_text, limit_text) = (display_number(height), display_number(limit));
    if height <= limit {
        Verdict::pass(
            kind.as_str(),
            format!("Cooler fits: {height_text}mm <= {limit_text}mm"),
        )
    } else {
        Verdict::fail(
            kind.as_str(),
            format!("Cooler too tall: {height_text}mm > {limit_text}mm"),
        )
    }
}

/// PSU dimensions are not modeled; any PSU/case pair passes.
pub fn psu_length_fit(first: &Component, second: &Component) -> Verdict {
    let kind = RuleKind::PsuLengthFit;
    if assign_roles(first, second, "psu", "case").is_none() {
        return not_applicable(kind, "PSU-case");
    }
    Verdict::pass(kind.as_str(), "PSU should fit in case (standard ATX sizing)")
}

pub fn power_requirement(first: &Component, second: &Component) -> Verdict {
    let kind = RuleKind::PowerRequirement;
    let Some((gpu, psu)) = assign_roles(first, second, "gpu", "psu") else {
        return not_applicable(kind, "GPU-PSU");
    };

    let wattage = psu.specs.wattage();
    let required = gpu.specs.tdp_watts() * POWER_HEADROOM;
    let wattage_text = display_number(wattage);
    if wattage >= required {
        Verdict::pass(
            kind.as_str(),
            format!("PSU sufficient: {wattage_text}W >= {required:.0}W required"),
        )
    } else {
        Verdict::fail(
            kind.as_str(),
            format!("PSU insufficient: {wattage_text}W < {required:.0}W required"),
        )
    }
}

pub fn form_factor_match(first: &Component, second: &Component) -> Verdict {
    let kind = RuleKind::FormFactorMatch;
    let Some((board, case)) = assign_roles(first, second, "motherboard", "case") else {
        return not_applicable(kind, "motherboard-case");
    };

    let board_ff = board.specs.form_factor();
    let case_ff = case.specs.form_factor();
    if case_ff.accepts(&board_ff) {
        Verdict::pass(
            kind.as_str(),
            format!("Form factor compatible: {board_ff} in {case_ff} case"),
        )
    } else {
        Verdict::fail(
            kind.as_str(),
            format!("Form factor incompatible: {board_ff} not supported in {case_ff} case"),
        )
    }
}
