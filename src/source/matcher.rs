use super::lines::is_separator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HitRank {
    LineStart,
    WordStart,
    Inside,
}

/// Indices of `lines` matching `term`, best hits first.
///
/// Lines starting with the term rank above lines where it starts a later
/// word, which rank above plain substring hits. Source order is kept inside
/// each rank. A blank term keeps every line, separators included; any other
/// term never matches a separator.
pub fn rank_lines(term: &str, lines: &[String]) -> Vec<usize> {
    let term = term.trim();
    if term.is_empty() {
        return (0..lines.len()).collect();
    }

    let needle = term.to_ascii_lowercase();
    let mut ranked: Vec<(HitRank, usize)> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !is_separator(line))
        .filter_map(|(idx, line)| hit_rank(line, &needle).map(|rank| (rank, idx)))
        .collect();
    ranked.sort_by_key(|&(rank, idx)| (rank, idx));
    ranked.into_iter().map(|(_, idx)| idx).collect()
}

fn hit_rank(line: &str, needle: &str) -> Option<HitRank> {
    let haystack = line.trim_start().to_ascii_lowercase();
    let mut best = None;
    for (start, _) in haystack.match_indices(needle) {
        let rank = if start == 0 {
            HitRank::LineStart
        } else if haystack[..start]
            .chars()
            .next_back()
            .is_some_and(|prev| !prev.is_alphanumeric())
        {
            HitRank::WordStart
        } else {
            HitRank::Inside
        };
        best = Some(best.map_or(rank, |current: HitRank| current.min(rank)));
        if rank == HitRank::LineStart {
            break;
        }
    }
    best
}
