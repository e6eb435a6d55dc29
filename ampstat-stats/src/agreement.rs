//! Agreement Statistics
//!
//! Cohen's Kappa between two techniques classifying the same samples, with a
//! large-sample normal-approximation interval:
//!
//! ```text
//!                    technique 2
//!                    +      -
//! technique 1  +     a      b
//!              -     c      d
//!
//! p_o = (a + d) / n
//! p_e = ((a + b)(a + c) + (c + d)(b + d)) / n^2
//! kappa = (p_o - p_e) / (1 - p_e)
//! SE = sqrt(p_o (1 - p_o)) / ((1 - p_e) sqrt(n))
//! ```

use crate::KAPPA_Z;
use crate::error::InputError;
use crate::estimate::Estimate;
use crate::interval::IntervalConfig;
use serde::{Deserialize, Serialize};

/// Binary results of two techniques over the same ordered samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedOutcomes {
    first: Vec<bool>,
    second: Vec<bool>,
}

impl PairedOutcomes {
    /// Validate two 0/1 sequences of equal length
    pub fn new(first: &[u8], second: &[u8]) -> Result<Self, InputError> {
        if first.len() != second.len() {
            return Err(InputError::LengthMismatch {
                first: first.len(),
                second: second.len(),
            });
        }
        Ok(Self {
            first: to_binary(first)?,
            second: to_binary(second)?,
        })
    }

    /// Build from boolean sequences of equal length
    pub fn from_bools(first: Vec<bool>, second: Vec<bool>) -> Result<Self, InputError> {
        if first.len() != second.len() {
            return Err(InputError::LengthMismatch {
                first: first.len(),
                second: second.len(),
            });
        }
        Ok(Self { first, second })
    }

    /// Number of paired samples
    pub fn len(&self) -> usize {
        self.first.len()
    }

    /// Whether there are no samples
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Cross-tabulate into the 2x2 agreement table
    pub fn table(&self) -> AgreementTable {
        let mut table = AgreementTable::default();
        for (&x, &y) in self.first.iter().zip(&self.second) {
            match (x, y) {
                (true, true) => table.a += 1,
                (true, false) => table.b += 1,
                (false, true) => table.c += 1,
                (false, false) => table.d += 1,
            }
        }
        table
    }
}

fn to_binary(values: &[u8]) -> Result<Vec<bool>, InputError> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| match value {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(InputError::NonBinaryOutcome { index, value }),
        })
        .collect()
}

/// 2x2 agreement table between two techniques
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgreementTable {
    /// Both positive
    pub a: u64,
    /// First positive, second negative
    pub b: u64,
    /// First negative, second positive
    pub c: u64,
    /// Both negative
    pub d: u64,
}

impl AgreementTable {
    /// Table from cell counts
    pub const fn from_counts(a: u64, b: u64, c: u64, d: u64) -> Self {
        Self { a, b, c, d }
    }

    /// Total paired samples
    pub fn n(&self) -> u64 {
        self.a + self.b + self.c + self.d
    }
}

/// Cohen's Kappa with its confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KappaResult {
    /// Cohen's Kappa
    pub kappa: f64,
    /// Lower bound, clamped to -1
    pub ci_low: f64,
    /// Upper bound, clamped to 1
    pub ci_high: f64,
    /// Large-sample standard error
    pub standard_error: f64,
    /// p_o
    pub observed_agreement: f64,
    /// p_e
    pub expected_agreement: f64,
    /// Paired samples
    pub n: u64,
}

impl KappaResult {
    /// Landis-Koch style reading of the coefficient
    pub fn interpretation(&self) -> KappaInterpretation {
        interpret_kappa(self.kappa)
    }
}

/// Cohen's Kappa for paired outcomes with a 95% interval (z = 1.96)
pub fn compute_kappa(paired: &PairedOutcomes) -> Estimate<KappaResult> {
    kappa_from_table(&paired.table(), KAPPA_Z)
}

/// Cohen's Kappa at the configured confidence level
pub fn compute_kappa_with(paired: &PairedOutcomes, config: &IntervalConfig) -> Estimate<KappaResult> {
    kappa_from_table(&paired.table(), config.z)
}

/// Cohen's Kappa from a pre-tabulated agreement table
///
/// `NotComputable` when the table is empty or when expected agreement is
/// exactly 1 (both techniques put every sample in the same class).
pub fn kappa_from_table(table: &AgreementTable, z: f64) -> Estimate<KappaResult> {
    let n = table.n();
    if n == 0 {
        tracing::debug!("empty agreement table, kappa not computable");
        return Estimate::NotComputable;
    }

    let (a, b, c, d) = (
        table.a as u128,
        table.b as u128,
        table.c as u128,
        table.d as u128,
    );
    let n_squared = (n as u128) * (n as u128);
    let expected_numerator = (a + b) * (a + c) + (c + d) * (b + d);
    if expected_numerator == n_squared {
        tracing::debug!(?table, "expected agreement is 1, kappa not computable");
        return Estimate::NotComputable;
    }

    let n_f = n as f64;
    let p_o = (table.a + table.d) as f64 / n_f;
    let p_e = expected_numerator as f64 / n_squared as f64;

    // kappa = (n(a+d) - E) / (n^2 - E) from exact integers, rounded once
    let observed_numerator = (n as u128) * (a + d);
    let denominator = (n_squared - expected_numerator) as f64;
    let kappa = if observed_numerator >= expected_numerator {
        (observed_numerator - expected_numerator) as f64 / denominator
    } else {
        -((expected_numerator - observed_numerator) as f64 / denominator)
    };

    let standard_error = (p_o * (1.0 - p_o)).sqrt() / ((1.0 - p_e) * n_f.sqrt());
    let margin = z * standard_error;

    Estimate::Computable(KappaResult {
        kappa,
        ci_low: (kappa - margin).max(-1.0),
        ci_high: (kappa + margin).min(1.0),
        standard_error,
        observed_agreement: p_o,
        expected_agreement: p_e,
        n,
    })
}

/// Strength of agreement implied by a kappa value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KappaInterpretation {
    /// kappa < 0
    Poor,
    /// 0 <= kappa < 0.20
    Slight,
    /// 0.20 <= kappa < 0.40
    Fair,
    /// 0.40 <= kappa < 0.60
    Moderate,
    /// 0.60 <= kappa < 0.80
    Substantial,
    /// kappa >= 0.80
    AlmostPerfect,
}

impl std::fmt::Display for KappaInterpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KappaInterpretation::Poor => write!(f, "Poor agreement (worse than chance)"),
            KappaInterpretation::Slight => write!(f, "Slight agreement"),
            KappaInterpretation::Fair => write!(f, "Fair agreement"),
            KappaInterpretation::Moderate => write!(f, "Moderate agreement"),
            KappaInterpretation::Substantial => write!(f, "Substantial agreement"),
            KappaInterpretation::AlmostPerfect => write!(f, "Almost perfect agreement"),
        }
    }
}

/// Interpret a kappa value
pub fn interpret_kappa(kappa: f64) -> KappaInterpretation {
    if kappa < 0.0 {
        KappaInterpretation::Poor
    } else if kappa < 0.20 {
        KappaInterpretation::Slight
    } else if kappa < 0.40 {
        KappaInterpretation::Fair
    } else if kappa < 0.60 {
        KappaInterpretation::Moderate
    } else if kappa < 0.80 {
        KappaInterpretation::Substantial
    } else {
        KappaInterpretation::AlmostPerfect
    }
}
