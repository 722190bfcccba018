//! Mail address parser
//!
//! Parses a single RFC 5322 style mailbox: either a bare `local@domain`
//! address or a `Display Name <local@domain>` form, with optional
//! surrounding whitespace. The parsed [`MailAddress::address`] is the
//! canonical `local@domain` text, which lets callers detect inputs that only
//! parse after normalization.

use crate::error::{Result, RosterError};
use nom::{
    branch::alt,
    bytes::complete::{take_till1, take_while, take_while1},
    character::complete::{anychar, char, multispace0},
    combinator::{all_consuming, map, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, separated_pair},
    IResult,
};
use std::fmt;

/// Printable characters allowed in an atom besides letters and digits
const ATEXT_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~";

/// A parsed mailbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddress {
    display_name: Option<String>,
    local_part: String,
    domain: String,
}

impl MailAddress {
    /// Parse a single mailbox. Lists of addresses and trailing garbage are rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let (_, (display_name, (local_part, domain))) = all_consuming(delimited(
            multispace0,
            alt((name_addr, map(addr_spec, |spec| (None, spec)))),
            multispace0,
        ))(input)
        .map_err(|e| RosterError::AddressParse(format!("{:?}", e)))?;

        Ok(MailAddress {
            display_name: display_name
                .map(|name| name.trim().trim_matches('"').to_string())
                .filter(|name| !name.is_empty()),
            local_part: local_part.to_string(),
            domain: domain.to_string(),
        })
    }

    /// Canonical `local@domain` form
    pub fn address(&self) -> String {
        format!("{}@{}", self.local_part, self.domain)
    }

    /// Display name, if the input used the `Name <addr>` form
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Part before the `@`
    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    /// Part after the `@`
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "\"{}\" <{}>", name, self.address()),
            None => write!(f, "{}", self.address()),
        }
    }
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || ATEXT_SPECIALS.contains(c)
        || (!c.is_ascii() && !c.is_whitespace() && !c.is_control())
}

fn dot_atom(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(char('.'), take_while1(is_atext)))(input)
}

fn quoted_string(input: &str) -> IResult<&str, &str> {
    let qtext = take_while1(|c: char| c != '"' && c != '\\' && c != '\r' && c != '\n');
    let quoted_pair = recognize(pair(char('\\'), anychar));

    recognize(delimited(
        char('"'),
        many0(alt((qtext, quoted_pair))),
        char('"'),
    ))(input)
}

fn domain_literal(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('['),
        take_while(|c: char| c != '[' && c != ']' && c != '\\' && !c.is_whitespace()),
        char(']'),
    ))(input)
}

fn addr_spec(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        alt((dot_atom, quoted_string)),
        char('@'),
        alt((dot_atom, domain_literal)),
    )(input)
}

fn name_addr(input: &str) -> IResult<&str, (Option<&str>, (&str, &str))> {
    pair(
        opt(take_till1(|c: char| c == '<')),
        delimited(char('<'), addr_spec, char('>')),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_address() {
        let addr = MailAddress::parse("alice@example.com").unwrap();
        assert_eq!(addr.local_part(), "alice");
        assert_eq!(addr.domain(), "example.com");
        assert_eq!(addr.display_name(), None);
        assert_eq!(addr.address(), "alice@example.com");
    }

    #[test]
    fn test_parse_display_name_form() {
        let addr = MailAddress::parse("Alice Smith <alice@example.com>").unwrap();
        assert_eq!(addr.display_name(), Some("Alice Smith"));
        assert_eq!(addr.address(), "alice@example.com");
        assert_eq!(addr.to_string(), "\"Alice Smith\" <alice@example.com>");
    }

    #[test]
    fn test_parse_angle_only() {
        let addr = MailAddress::parse("<bob@example.org>").unwrap();
        assert_eq!(addr.display_name(), None);
        assert_eq!(addr.address(), "bob@example.org");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let addr = MailAddress::parse("  carol@example.net \t").unwrap();
        assert_eq!(addr.address(), "carol@example.net");
    }

    #[test]
    fn test_parse_quoted_local_part() {
        let addr = MailAddress::parse("\"john doe\"@example.com").unwrap();
        assert_eq!(addr.local_part(), "\"john doe\"");
    }

    #[test]
    fn test_parse_domain_literal() {
        let addr = MailAddress::parse("root@[192.168.0.1]").unwrap();
        assert_eq!(addr.domain(), "[192.168.0.1]");
    }

    #[test]
    fn test_parse_single_label_domain() {
        assert!(MailAddress::parse("admin@localhost").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "",
            "plainaddress",
            "@example.com",
            "alice@",
            "alice@@example.com",
            "alice.@example.com",
            "al..ice@example.com",
            "alice@example..com",
            "alice smith@example.com",
            "alice@example.com, bob@example.com",
            "Alice <alice@example.com",
        ] {
            assert!(
                matches!(MailAddress::parse(input), Err(RosterError::AddressParse(_))),
                "expected parse failure for {:?}",
                input
            );
        }
    }
}
