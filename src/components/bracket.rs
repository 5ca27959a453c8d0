use ncaa_bracket::BracketTable;
use std::fmt;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Drawn before a team's code in every round after the first it reached.
pub const LINE_SEP: &str = "---";

/// Padding that follows each unreached round column.
pub const BLANK_SEP: &str = "   ";

/// Column piece for an unreached round when the slot sits in the near half.
const CONNECTOR: &str = "  |";

/// A spacer line follows every slot whose 1-based index divides one of these.
/// Chosen for a 64-slot bracket: groups of 4 and of 16 first-round teams.
const SPACER_INTERVALS: [usize; 2] = [4, 16];

/// Whether `slot` lies in the near (upper) half of its round-`round + 1`
/// pairing, i.e. `slot mod 2^(r+1) <= slot mod 2^r`.
pub fn in_near_half(slot: usize, round: usize) -> bool {
    slot % (1 << (round + 1)) <= slot % (1 << round)
}

// ---------------------------------------------------------------------------
// BracketView
// ---------------------------------------------------------------------------

/// Text diagram of a reconstructed bracket: one line per first-round slot,
/// showing how far that team advanced.
pub struct BracketView<'a, T> {
    pub table: &'a BracketTable<T>,
}

impl<'a, T: fmt::Display + PartialEq> BracketView<'a, T> {
    pub fn new(table: &'a BracketTable<T>) -> Self {
        Self { table }
    }

    pub fn render(&self) -> String {
        let first_round = self.table.first_round();
        let mut out = String::new();
        for (slot, team) in first_round.iter().enumerate() {
            let line = self.render_line(slot, team);
            out.push_str(&line);
            out.push('\n');

            if slot + 1 == first_round.len() {
                break;
            }
            for interval in SPACER_INTERVALS {
                if (slot + 1) % interval == 0 {
                    out.push_str(&spacer_line(&line));
                    out.push('\n');
                }
            }
        }
        out.push('\n');
        out
    }

    fn render_line(&self, slot: usize, team: &T) -> String {
        let mut line = String::new();
        let mut first_blank = true;
        for round in 0..self.table.num_rounds() {
            if self.table.contains(round, team) {
                if round > 0 {
                    line.push_str(LINE_SEP);
                }
                line.push_str(&team.to_string());
                continue;
            }
            if first_blank {
                line.push_str(BLANK_SEP);
                first_blank = false;
            }
            line.push_str(if in_near_half(slot, round) { CONNECTOR } else { BLANK_SEP });
            line.push_str(BLANK_SEP);
        }
        line
    }
}

impl<T: fmt::Display + PartialEq> fmt::Display for BracketView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// `line` with its leading code column blanked out.
fn spacer_line(line: &str) -> String {
    let rest: String = line.chars().skip(BLANK_SEP.len()).collect();
    format!("{BLANK_SEP}{rest}")
}
