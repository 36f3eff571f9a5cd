use geoloc_core::LocationRecord;
use std::collections::HashMap;
use std::io::{self, Write};

/// One CSV row: `"raw","country","code"`, quoted and escaped.
pub fn write_row<W: Write>(out: &mut W, raw: &str, location: &LocationRecord) -> io::Result<()> {
    writeln!(
        out,
        "{:?},{:?},{:?}",
        raw, location.country, location.long_country_code
    )
}

/// Counts per country code, most frequent first; ties go to the smaller code.
pub fn tally<'a, I>(codes: I) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for code in codes {
        *counts.entry(code).or_default() += 1;
    }
    let mut items: Vec<_> = counts.into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    items
}

pub fn write_frequencies<W: Write>(out: &mut W, items: &[(&str, usize)]) -> io::Result<()> {
    writeln!(out, "Frequencies:")?;
    for (code, n) in items {
        writeln!(out, "{code}: {n}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_sorts_by_count_then_code() {
        let codes = ["usa", "mex", "fra", "mex", "usa", "arg", "usa"];
        assert_eq!(
            tally(codes),
            vec![("usa", 3), ("mex", 2), ("arg", 1), ("fra", 1)]
        );
        assert!(tally(std::iter::empty()).is_empty());
    }

    #[test]
    fn rows_are_quoted_csv() {
        let loc = LocationRecord {
            country: "united states".into(),
            long_country_code: "usa".into(),
            ..Default::default()
        };
        let mut out = Vec::new();
        write_row(&mut out, "Springfield, \"IL\"", &loc).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"Springfield, \\\"IL\\\"\",\"united states\",\"usa\"\n"
        );
    }

    #[test]
    fn frequencies_block() {
        let mut out = Vec::new();
        write_frequencies(&mut out, &[("usa", 2), ("fra", 1)]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Frequencies:\nusa: 2\nfra: 1\n"
        );
    }
}
