//! Chain splitting for `;`, `&&`, and `||`
//!
//! An input line is consumed one segment at a time. The operator found
//! after a segment gates the segment that follows it: `;` always runs it,
//! `&&` runs it only when the previous status was zero, `||` only when it
//! was non-zero. Operator characters are always significant; there is no
//! quoting or escaping.

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::anychar;
use nom::combinator::value;
use nom::multi::many_till;
use nom::IResult;

/// Operator linking one chain segment to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainOp {
    /// No operator before this segment; it always runs.
    #[default]
    Norm,
    /// `&&`: run the next segment only on success.
    And,
    /// `||`: run the next segment only on failure.
    Or,
    /// `;`: always run the next segment.
    Chain,
}

impl ChainOp {
    /// Whether a segment gated by this operator should run, given the exit
    /// status of everything before it.
    pub fn permits(self, last_status: i32) -> bool {
        match self {
            ChainOp::Norm | ChainOp::Chain => true,
            ChainOp::And => last_status == 0,
            ChainOp::Or => last_status != 0,
        }
    }
}

fn chain_op(input: &str) -> IResult<&str, ChainOp> {
    alt((
        value(ChainOp::And, tag("&&")),
        value(ChainOp::Or, tag("||")),
        value(ChainOp::Chain, tag(";")),
    ))(input)
}

/// Everything up to the earliest operator, plus the operator itself.
fn split_at_op(input: &str) -> IResult<&str, (Vec<char>, ChainOp)> {
    many_till(anychar, chain_op)(input)
}

/// The unconsumed remainder of a multi-segment input line.
#[derive(Debug, Default)]
pub struct ChainBuffer {
    rest: Option<String>,
}

impl ChainBuffer {
    pub fn load(&mut self, line: &str) {
        self.rest = Some(line.to_string());
    }

    /// Take the next segment and the operator that follows it. The returned
    /// operator gates the segment produced by the *next* call. Segments are
    /// trimmed; an intermediate empty segment (e.g. `a ;; b`) comes back as
    /// an empty string the driver treats as a no-op.
    pub fn next_segment(&mut self) -> Option<(String, ChainOp)> {
        let rest = self.rest.take()?;
        match split_at_op(&rest) {
            Ok((remainder, (taken, op))) => {
                self.rest = Some(remainder.to_string());
                let segment: String = taken.into_iter().collect();
                Some((segment.trim().to_string(), op))
            }
            Err(_) => {
                let segment = rest.trim().to_string();
                if segment.is_empty() {
                    None
                } else {
                    Some((segment, ChainOp::Norm))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(line: &str) -> Vec<(String, ChainOp)> {
        let mut buffer = ChainBuffer::default();
        buffer.load(line);
        let mut out = Vec::new();
        while let Some(seg) = buffer.next_segment() {
            out.push(seg);
        }
        out
    }

    #[test]
    fn single_segment_has_no_operator() {
        assert_eq!(segments("ls -l"), vec![("ls -l".into(), ChainOp::Norm)]);
    }

    #[test]
    fn semicolon_splits() {
        assert_eq!(
            segments("lsssss ; echo hi"),
            vec![
                ("lsssss".into(), ChainOp::Chain),
                ("echo hi".into(), ChainOp::Norm),
            ]
        );
    }

    #[test]
    fn and_then_or() {
        assert_eq!(
            segments("a && b || c"),
            vec![
                ("a".into(), ChainOp::And),
                ("b".into(), ChainOp::Or),
                ("c".into(), ChainOp::Norm),
            ]
        );
    }

    #[test]
    fn trailing_operator_leaves_no_final_segment() {
        assert_eq!(segments("ls ;"), vec![("ls".into(), ChainOp::Chain)]);
    }

    #[test]
    fn double_semicolon_yields_empty_noop_segment() {
        assert_eq!(
            segments("a ;; b"),
            vec![
                ("a".into(), ChainOp::Chain),
                ("".into(), ChainOp::Chain),
                ("b".into(), ChainOp::Norm),
            ]
        );
    }

    #[test]
    fn gating_rules() {
        assert!(ChainOp::Chain.permits(0));
        assert!(ChainOp::Chain.permits(127));
        assert!(ChainOp::And.permits(0));
        assert!(!ChainOp::And.permits(1));
        assert!(!ChainOp::Or.permits(0));
        assert!(ChainOp::Or.permits(127));
    }

    #[test]
    fn single_ampersand_is_not_an_operator() {
        assert_eq!(segments("a & b"), vec![("a & b".into(), ChainOp::Norm)]);
    }
}
