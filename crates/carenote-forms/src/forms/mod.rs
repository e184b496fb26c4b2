pub mod accident;
pub mod admission;
pub mod antibiotic;
pub mod change_of_condition;
pub mod expiry;
pub mod observation;
pub mod psych_consult;
pub mod vaccination;
