//----------------------------------------
// distribution mod
//----------------------------------------
pub mod error;
pub mod noncentral_t;
pub mod std_normal;
