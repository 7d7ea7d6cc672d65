// Japanese school stages by age, used to plan how long a family has to save.
use std::fmt;

/// Age at which a child is assumed to finish university.
pub const GRADUATION_AGE: u32 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchoolGrade {
    Preschool,
    Kindergarten,
    /// 1..=6
    Elementary(u32),
    /// 1..=3
    JuniorHigh(u32),
    /// 1..=3
    SeniorHigh(u32),
    /// 1..=4
    University(u32),
    Graduated,
}

impl SchoolGrade {
    pub fn english_label(&self) -> String {
        match self {
            SchoolGrade::Preschool => "pre-school".to_string(),
            SchoolGrade::Kindergarten => "kindergarten".to_string(),
            SchoolGrade::Elementary(n) => format!("elementary grade {}", n),
            SchoolGrade::JuniorHigh(n) => format!("junior high grade {}", n),
            SchoolGrade::SeniorHigh(n) => format!("senior high grade {}", n),
            SchoolGrade::University(n) => format!("university year {}", n),
            SchoolGrade::Graduated => "graduated".to_string(),
        }
    }
}

impl fmt::Display for SchoolGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchoolGrade::Preschool => f.write_str("未就学"),
            SchoolGrade::Kindergarten => f.write_str("幼稚園"),
            SchoolGrade::Elementary(n) => write!(f, "小学{}年", n),
            SchoolGrade::JuniorHigh(n) => write!(f, "中学{}年", n),
            SchoolGrade::SeniorHigh(n) => write!(f, "高校{}年", n),
            SchoolGrade::University(n) => write!(f, "大学{}年", n),
            SchoolGrade::Graduated => f.write_str("卒業"),
        }
    }
}

pub fn grade_for_age(age: u32) -> SchoolGrade {
    match age {
        0..=2 => SchoolGrade::Preschool,
        3..=5 => SchoolGrade::Kindergarten,
        6..=11 => SchoolGrade::Elementary(age - 5),
        12..=14 => SchoolGrade::JuniorHigh(age - 11),
        15..=17 => SchoolGrade::SeniorHigh(age - 14),
        18..=21 => SchoolGrade::University(age - 17),
        _ => SchoolGrade::Graduated,
    }
}

/// Years left to save before the child reaches [`GRADUATION_AGE`]; never negative.
pub fn investment_years_remaining(age: u32) -> u32 {
    GRADUATION_AGE.saturating_sub(age)
}
