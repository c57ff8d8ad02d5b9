use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// One of the four regulatory sources processed per quarter.
///
/// The enum order is the filename-match priority: a filename containing more
/// than one code is attributed to the first matching source.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Source {
    /// Investigational-drug filings.
    Ind,
    /// New-drug filings.
    Nda,
    /// Foreign-market approvals.
    Fda,
    /// Domestic drug-administration approvals.
    Nmpa,
}

impl Source {
    pub const ALL: [Source; 4] = [Source::Ind, Source::Nda, Source::Fda, Source::Nmpa];

    /// Order of the sheets in the final aligned workbook.
    pub const EXPORT_ORDER: [Source; 4] = [Source::Nmpa, Source::Fda, Source::Ind, Source::Nda];

    /// Filename-match key, also used in intermediate file names.
    pub fn code(self) -> &'static str {
        match self {
            Source::Ind => "IND",
            Source::Nda => "NDA",
            Source::Fda => "FDA",
            Source::Nmpa => "NMPA",
        }
    }

    /// Sheet holding the raw rows in the source workbook.
    pub fn input_sheet(self) -> &'static str {
        match self {
            Source::Ind | Source::Nda | Source::Nmpa => "数据详情",
            Source::Fda => "目标药品",
        }
    }

    /// Sheet name of this source in the final aligned workbook.
    pub fn output_sheet(self) -> &'static str {
        match self {
            Source::Ind => "China IND",
            Source::Nda => "China NDA",
            Source::Fda => "FDA approved drugs",
            Source::Nmpa => "NMPA approved drugs",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A calendar quarter with fixed closed day bounds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }

    /// Closed [start, end] interval of the quarter in the given year.
    ///
    /// Day-of-month bounds are the fixed literals Q1=[01-01, 03-31],
    /// Q2=[04-01, 06-30], Q3=[07-01, 09-30], Q4=[10-01, 12-31].
    pub fn bounds(self, year: i32) -> (NaiveDate, NaiveDate) {
        let (start_month, start_day, end_month, end_day) = match self {
            Quarter::Q1 => (1, 1, 3, 31),
            Quarter::Q2 => (4, 1, 6, 30),
            Quarter::Q3 => (7, 1, 9, 30),
            Quarter::Q4 => (10, 1, 12, 31),
        };
        let start = NaiveDate::from_ymd_opt(year, start_month, start_day)
            .expect("quarter start is a valid calendar date");
        let end = NaiveDate::from_ymd_opt(year, end_month, end_day)
            .expect("quarter end is a valid calendar date");
        (start, end)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Quarter {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            other => Err(format!("unknown quarter '{other}', expected Q1..Q4")),
        }
    }
}
