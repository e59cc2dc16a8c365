pub mod personal_sign;
