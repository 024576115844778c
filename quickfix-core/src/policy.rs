//! Caller policy over resolved fixes.
//!
//! Policy only labels fixes. It never reorders, merges, or drops them.

use quickfix_fixer_catalog::safety_of;
use quickfix_types::FixSafety;
use quickfix_types::report::FixStatus;

/// Status of a fix with key `fix_id` under allow/deny glob patterns.
///
/// Deny wins over allow; an empty allow list allows everything.
pub fn fix_status(allow: &[String], deny: &[String], fix_id: &str) -> FixStatus {
    if deny.iter().any(|pat| glob_match(pat, fix_id)) {
        return FixStatus::Filtered;
    }
    if !allow.is_empty() && !allow.iter().any(|pat| glob_match(pat, fix_id)) {
        return FixStatus::Filtered;
    }
    FixStatus::Offered
}

/// Safety class used by the apply gate. Keys missing from the catalog are
/// guarded.
pub fn safety_for(fix_id: &str) -> FixSafety {
    safety_of(fix_id).unwrap_or(FixSafety::Guarded)
}

/// `*` matches any run of characters, `?` exactly one.
pub fn glob_match(pat: &str, text: &str) -> bool {
    let p = pat.as_bytes();
    let t = text.as_bytes();
    let mut dp = vec![vec![false; t.len() + 1]; p.len() + 1];
    dp[0][0] = true;

    for i in 1..=p.len() {
        if p[i - 1] == b'*' {
            dp[i][0] = dp[i - 1][0];
        }
    }

    for i in 1..=p.len() {
        for j in 1..=t.len() {
            dp[i][j] = match p[i - 1] {
                b'*' => dp[i - 1][j] || dp[i][j - 1],
                b'?' => dp[i - 1][j - 1],
                c => dp[i - 1][j - 1] && c == t[j - 1],
            };
        }
    }

    dp[p.len()][t.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pats(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn glob_handles_star_and_question() {
        assert!(glob_match("modifier.*", "modifier.add_lateinit"));
        assert!(glob_match("*.remove_*", "argument.remove_spread"));
        assert!(!glob_match("when.?", "when.add_else_branch"));
        assert!(glob_match("type.remove_nullabl?", "type.remove_nullable"));
        assert!(glob_match("*", ""));
    }

    #[test]
    fn deny_beats_allow() {
        let allow = pats(&["modifier.*"]);
        let deny = pats(&["modifier.remove_*"]);
        assert_eq!(fix_status(&allow, &deny, "modifier.add_override"), FixStatus::Offered);
        assert_eq!(fix_status(&allow, &deny, "modifier.remove_open"), FixStatus::Filtered);
        assert_eq!(fix_status(&allow, &deny, "when.add_else_branch"), FixStatus::Filtered);
    }

    #[test]
    fn empty_policy_offers_everything() {
        assert_eq!(fix_status(&[], &[], "anything.at_all"), FixStatus::Offered);
    }

    #[test]
    fn unknown_keys_are_guarded() {
        assert_eq!(safety_for("expression.remove_useless_cast"), FixSafety::Safe);
        assert_eq!(safety_for("no.such_fix"), FixSafety::Guarded);
    }
}
