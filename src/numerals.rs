use crate::audio::{Number, NumberError};

const UP_TO_TWENTY: [&str; 20] = [
    "eins", "zwei", "drei", "vier", "fünf", "sechs", "sieben", "acht", "neun", "zehn", "elf",
    "zwölf", "dreizehn", "vierzehn", "fünfzehn", "sechzehn", "siebzehn", "achtzehn", "neunzehn",
    "zwanzig",
];

// Indexed by the tens digit; 0 and 1 never reach this table.
const TENS: [&str; 10] = [
    "", "", "zwanzig", "dreißig", "vierzig", "fünfzig", "sechzig", "siebzig", "achtzig",
    "neunzig",
];

/// Transcribe a raw integer into German words.
pub fn transcribe(n: i64) -> Result<String, NumberError> {
    Number::new(n).map(Number::german_words)
}

impl Number {
    pub fn german_words(self) -> String {
        let n = self.get() as usize;
        match n {
            1..=20 => UP_TO_TWENTY[n - 1].to_string(),
            100 => "hundert".to_string(),
            _ => {
                let (tens, ones) = (n / 10, n % 10);
                if ones == 0 {
                    TENS[tens].to_string()
                } else {
                    format!("{}und{}", compound_ones(ones), TENS[tens])
                }
            }
        }
    }
}

/// "eins" drops its final s inside a compound.
fn compound_ones(ones: usize) -> &'static str {
    if ones == 1 {
        "ein"
    } else {
        UP_TO_TWENTY[ones - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_forms_up_to_twenty() {
        let expected = [
            "eins", "zwei", "drei", "vier", "fünf", "sechs", "sieben", "acht", "neun", "zehn",
            "elf", "zwölf", "dreizehn", "vierzehn", "fünfzehn", "sechzehn", "siebzehn",
            "achtzehn", "neunzehn", "zwanzig",
        ];
        for (i, word) in expected.iter().enumerate() {
            assert_eq!(transcribe(i as i64 + 1).unwrap(), *word);
        }
    }

    #[test]
    fn round_tens() {
        assert_eq!(transcribe(30).unwrap(), "dreißig");
        assert_eq!(transcribe(40).unwrap(), "vierzig");
        assert_eq!(transcribe(50).unwrap(), "fünfzig");
        assert_eq!(transcribe(60).unwrap(), "sechzig");
        assert_eq!(transcribe(70).unwrap(), "siebzig");
        assert_eq!(transcribe(80).unwrap(), "achtzig");
        assert_eq!(transcribe(90).unwrap(), "neunzig");
    }

    #[test]
    fn compounds_put_ones_before_tens() {
        assert_eq!(transcribe(21).unwrap(), "einundzwanzig");
        assert_eq!(transcribe(47).unwrap(), "siebenundvierzig");
        assert_eq!(transcribe(33).unwrap(), "dreiunddreißig");
        assert_eq!(transcribe(66).unwrap(), "sechsundsechzig");
        assert_eq!(transcribe(99).unwrap(), "neunundneunzig");
    }

    #[test]
    fn every_compound_is_ones_und_tens() {
        let mut checked = 0;
        for n in 21..=99i64 {
            if n % 10 == 0 {
                continue;
            }
            let (tens, ones) = ((n / 10) as usize, (n % 10) as usize);
            let expected = format!("{}und{}", compound_ones(ones), TENS[tens]);
            assert_eq!(transcribe(n).unwrap(), expected, "{}", n);
            checked += 1;
        }
        assert_eq!(checked, 72);
    }

    #[test]
    fn compound_ones_only_shortens_eins() {
        assert_eq!(compound_ones(1), "ein");
        for ones in 2..=9 {
            assert_eq!(compound_ones(ones), UP_TO_TWENTY[ones - 1]);
        }
    }

    #[test]
    fn hundred() {
        assert_eq!(transcribe(100).unwrap(), "hundert");
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(transcribe(0), Err(NumberError::OutOfRange(0)));
        assert_eq!(transcribe(101), Err(NumberError::OutOfRange(101)));
        assert_eq!(transcribe(1000), Err(NumberError::OutOfRange(1000)));
    }

    #[test]
    fn transcription_is_stable() {
        for n in 1..=100 {
            assert_eq!(transcribe(n).unwrap(), transcribe(n).unwrap());
        }
    }
}
