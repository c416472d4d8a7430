pub mod explain_risk;

pub use explain_risk::ExplainRiskUseCase;
