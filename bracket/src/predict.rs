use crate::{BracketError, BracketResult, Team, TeamDirectory};
use std::fmt;

/// Predicted scoreline between two teams, first team first.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub first_name: String,
    pub first_score: f64,
    pub second_name: String,
    pub second_score: f64,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.1}, {} {:.1}",
            self.first_name, self.first_score, self.second_name, self.second_score
        )
    }
}

/// Each side's score is its offense vector weighted by the other side's defense.
pub fn predict_score(teams: &TeamDirectory, first: &str, second: &str) -> BracketResult<Prediction> {
    let a = teams.by_code(first)?;
    let b = teams.by_code(second)?;
    Ok(Prediction {
        first_name: teams.name(a.id)?.to_owned(),
        first_score: weighted_sum(a, b)?,
        second_name: teams.name(b.id)?.to_owned(),
        second_score: weighted_sum(b, a)?,
    })
}

fn weighted_sum(attack: &Team, defend: &Team) -> BracketResult<f64> {
    if attack.offense.len() != defend.defense.len() {
        return Err(BracketError::RatingLength {
            code: format!("{}/{}", attack.code, defend.code),
            offense: attack.offense.len(),
            defense: defend.defense.len(),
        });
    }
    Ok(attack.offense.iter().zip(&defend.defense).map(|(o, d)| o * d).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, TeamId};

    fn team(id: u32, code: &str, offense: Vec<f64>, defense: Vec<f64>) -> Team {
        Team {
            id: TeamId(id),
            code: code.into(),
            name: code.to_uppercase(),
            offense,
            defense,
        }
    }

    fn directory() -> TeamDirectory {
        TeamDirectory::from_teams([
            team(1, "mbp", vec![30.0, 40.0], vec![1.0, 0.5]),
            team(2, "aah", vec![20.0, 50.0], vec![1.5, 1.0]),
            team(3, "nav", vec![10.0], vec![1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_predict_score() {
        let p = predict_score(&directory(), "mbp", "aah").unwrap();
        // 30*1.5 + 40*1.0, 20*1.0 + 50*0.5
        assert_eq!(p.first_score, 85.0);
        assert_eq!(p.second_score, 45.0);
        assert_eq!(p.to_string(), "MBP 85.0, AAH 45.0");
    }

    #[test]
    fn test_predict_unknown_code() {
        let err = predict_score(&directory(), "mbp", "zzz").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LookupMiss);
    }

    #[test]
    fn test_predict_mismatched_ratings() {
        let err = predict_score(&directory(), "mbp", "nav").unwrap_err();
        assert!(matches!(err, BracketError::RatingLength { offense: 2, defense: 1, .. }));
    }
}
