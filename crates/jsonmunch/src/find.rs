//! Candidate comparison against streamed strings, and key search built on
//! top of it.

use crate::error::ParseError;
use crate::source::Source;
use crate::value::{JsonStatus, JsonValue};

/// In-place insertion sort. Candidate lists are short and usually arrive
/// nearly sorted.
fn insertion_sort(vals: &mut [&str]) {
    for i in 1..vals.len() {
        let mut j = i;
        while j > 0 && vals[j] < vals[j - 1] {
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}

impl<S: Source> JsonValue<S> {
    /// Stream this `String` against a candidate set, short-circuiting as
    /// soon as the prefix read so far can match none of them.
    ///
    /// Returns the matched candidate, or `None` after skipping the rest of
    /// the string on a miss.
    ///
    /// # Errors
    ///
    /// [`ParseError::NoCandidates`] on an empty candidate list, plus
    /// anything [`read`](JsonValue::read) can fail with.
    pub fn compare<'c>(
        &mut self,
        candidates: &[&'c str],
    ) -> Result<Option<&'c str>, ParseError<S::Error>> {
        if candidates.is_empty() {
            return Err(ParseError::NoCandidates);
        }
        let mut sorted = candidates.to_vec();
        insertion_sort(&mut sorted);
        self.compare_sorted(&sorted)
    }

    /// Requires `vals` sorted ascending and non-empty.
    ///
    /// `x` walks the candidate list while `y..z` tracks the matched prefix;
    /// `x` only moves to the next candidate while that candidate still
    /// shares the prefix matched so far.
    pub(crate) fn compare_sorted<'c>(
        &mut self,
        vals: &[&'c str],
    ) -> Result<Option<&'c str>, ParseError<S::Error>> {
        let mut chunk = [0u8; 16];
        let mut x = 0;
        let mut z = 0;
        loop {
            let l = self.read(&mut chunk)?;
            let ended = self.status() == JsonStatus::Complete;
            let y = z;
            z += l;
            loop {
                let cand = vals[x].as_bytes();
                if cand.len() >= z && cand[y..z] == chunk[..l] {
                    break;
                }
                let viable = x + 1 < vals.len()
                    && vals[x + 1].len() >= y
                    && vals[x + 1].as_bytes()[..y] == cand[..y];
                if !viable {
                    self.close()?;
                    return Ok(None);
                }
                x += 1;
            }
            if ended && z == vals[x].len() {
                return Ok(Some(vals[x]));
            } else if ended {
                return Ok(None);
            }
        }
    }

    /// Scan forward through an `Object` for the first key matching one of
    /// `keys`, discarding everything before it.
    ///
    /// On a hit, returns the matched candidate together with the handle for
    /// the key's value. `Ok(None)` means the object ended with no match.
    ///
    /// # Errors
    ///
    /// [`ParseError::NoCandidates`] on an empty candidate list, plus any
    /// navigation or read failure along the way.
    pub fn find_key<'c>(
        &mut self,
        keys: &[&'c str],
    ) -> Result<Option<(&'c str, JsonValue<S>)>, ParseError<S::Error>> {
        if keys.is_empty() {
            return Err(ParseError::NoCandidates);
        }
        let mut sorted = keys.to_vec();
        insertion_sort(&mut sorted);
        loop {
            let Some(mut key) = self.next_key()? else {
                return Ok(None);
            };
            if let Some(matched) = key.compare_sorted(&sorted)? {
                return match self.next_value()? {
                    Some(val) => Ok(Some((matched, val))),
                    // A value always follows a fetched key.
                    None => Ok(None),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::insertion_sort;

    #[test]
    fn sorts_nearly_sorted_input() {
        let mut vals = ["ban", "bar", "baz", "abc"];
        insertion_sort(&mut vals);
        assert_eq!(vals, ["abc", "ban", "bar", "baz"]);
    }

    #[test]
    fn sorted_input_is_untouched() {
        let mut vals = ["a", "b", "c"];
        insertion_sort(&mut vals);
        assert_eq!(vals, ["a", "b", "c"]);
    }
}
