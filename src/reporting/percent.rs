//! Largest-remainder percentage normalization for source breakdowns.

use indexmap::IndexMap;

/// One booking channel's share of the period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceShare {
    pub source: String,
    pub count: i64,
    pub percentage: i64,
}

/// Turn per-source counts into integer percentages that sum to exactly
/// 100 whenever the total is positive.
///
/// Each category gets the floor of its exact share; the remaining points
/// go, one each, to the categories with the largest fractional
/// remainders. Only categories with a nonzero remainder are eligible for
/// an extra point; ties keep the input order. The output is sorted by
/// count descending for display.
pub fn normalize_percentages(counts: &IndexMap<String, i64>) -> Vec<SourceShare> {
    let total: i64 = counts.values().sum();

    if total == 0 {
        return counts
            .iter()
            .map(|(source, &count)| SourceShare {
                source: source.clone(),
                count,
                percentage: 0,
            })
            .collect();
    }

    struct Share {
        source: String,
        count: i64,
        percentage: i64,
        remainder: i64,
    }

    let mut shares: Vec<Share> = counts
        .iter()
        .map(|(source, &count)| {
            let scaled = 100 * count;
            Share {
                source: source.clone(),
                count,
                percentage: scaled / total,
                remainder: scaled % total,
            }
        })
        .collect();

    let floor_sum: i64 = shares.iter().map(|s| s.percentage).sum();
    let deficit = 100 - floor_sum;

    // Stable sort keeps input order among equal remainders
    let mut by_remainder: Vec<usize> = (0..shares.len()).collect();
    by_remainder.sort_by(|&a, &b| shares[b].remainder.cmp(&shares[a].remainder));

    let mut awarded = 0;
    for &idx in &by_remainder {
        if awarded >= deficit {
            break;
        }
        if shares[idx].remainder > 0 {
            shares[idx].percentage += 1;
            awarded += 1;
        }
    }

    let mut output: Vec<SourceShare> = shares
        .into_iter()
        .map(|s| SourceShare {
            source: s.source,
            count: s.count,
            percentage: s.percentage,
        })
        .collect();
    output.sort_by(|a, b| b.count.cmp(&a.count));
    output
}
