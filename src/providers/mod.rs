pub mod national_bank;

pub use national_bank::NationalBankProvider;
