pub mod emi;
