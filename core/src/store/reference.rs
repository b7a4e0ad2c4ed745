//! The reference dataset: six telecom customers plus the headline model
//! and dashboard figures they were published with.
//!
//! Two High, one Medium and three Low risk customers. Tests rely on this
//! mix; append new customers rather than editing existing ones.

use crate::{
    customer::{ChurnFactor, CustomerRecord},
    model_performance::ModelMetrics,
    store::DashboardStats,
    types::{PlanTier, Region, RiskTier},
};

fn factor(name: &str, impact: f64, description: &str) -> ChurnFactor {
    ChurnFactor {
        name:        name.into(),
        description: description.into(),
        impact,
    }
}

pub fn customers() -> Vec<CustomerRecord> {
    vec![
        CustomerRecord {
            id:                "CUST001".into(),
            name:              "Sarah Johnson".into(),
            age:               34,
            gender:            Some("Female".into()),
            region:            Region::North,
            plan_type:         PlanTier::Premium,
            tenure:            24,
            contract_type:     "Two year".into(),
            payment_method:    "Credit Card".into(),
            internet_service:  "Fiber".into(),
            online_security:   true,
            tech_support:      true,
            streaming_tv:      true,
            streaming_movies:  true,
            monthly_charges:   89.99,
            total_charges:     2159.76,
            churn_probability: 0.23,
            churn_risk:        RiskTier::Low,
            top_churn_factors: vec![
                factor("Monthly Charges", 0.15, "High monthly charges increase churn risk"),
                factor("Contract Type", -0.12, "Long-term contract reduces churn risk"),
                factor("Tech Support", -0.08, "Having tech support reduces churn risk"),
                factor("Tenure", -0.06, "Longer tenure reduces churn risk"),
                factor("Internet Service", 0.04, "Fiber service slightly increases churn risk"),
            ],
            last_activity:     Some("2024-01-15".into()),
            support_tickets:   2,
            avg_call_duration: 8.5,
            data_usage:        45.2,
        },
        CustomerRecord {
            id:                "CUST002".into(),
            name:              "Michael Chen".into(),
            age:               28,
            gender:            Some("Male".into()),
            region:            Region::South,
            plan_type:         PlanTier::Basic,
            tenure:            12,
            contract_type:     "Month-to-month".into(),
            payment_method:    "Bank Transfer".into(),
            internet_service:  "DSL".into(),
            online_security:   false,
            tech_support:      false,
            streaming_tv:      false,
            streaming_movies:  false,
            monthly_charges:   29.99,
            total_charges:     359.88,
            churn_probability: 0.78,
            churn_risk:        RiskTier::High,
            top_churn_factors: vec![
                factor("Contract Type", 0.35, "Month-to-month contract increases churn risk"),
                factor("No Tech Support", 0.22, "Lack of tech support increases churn risk"),
                factor("Low Tenure", 0.18, "Short tenure increases churn risk"),
                factor("Basic Plan", 0.15, "Basic plan customers more likely to churn"),
                factor("Payment Method", 0.08, "Bank transfer payment increases churn risk"),
            ],
            last_activity:     Some("2024-01-10".into()),
            support_tickets:   5,
            avg_call_duration: 15.2,
            data_usage:        12.8,
        },
        CustomerRecord {
            id:                "CUST003".into(),
            name:              "Emily Rodriguez".into(),
            age:               45,
            gender:            Some("Female".into()),
            region:            Region::West,
            plan_type:         PlanTier::Enterprise,
            tenure:            36,
            contract_type:     "Two year".into(),
            payment_method:    "Credit Card".into(),
            internet_service:  "Fiber".into(),
            online_security:   true,
            tech_support:      true,
            streaming_tv:      true,
            streaming_movies:  true,
            monthly_charges:   119.99,
            total_charges:     4319.64,
            churn_probability: 0.15,
            churn_risk:        RiskTier::Low,
            top_churn_factors: vec![
                factor("Monthly Charges", 0.18, "High monthly charges increase churn risk"),
                factor("Contract Type", -0.15, "Long-term contract reduces churn risk"),
                factor("Tenure", -0.12, "Long tenure significantly reduces churn risk"),
                factor("Tech Support", -0.08, "Having tech support reduces churn risk"),
                factor("Age", -0.05, "Older customers less likely to churn"),
            ],
            last_activity:     Some("2024-01-14".into()),
            support_tickets:   1,
            avg_call_duration: 6.3,
            data_usage:        78.5,
        },
        CustomerRecord {
            id:                "CUST004".into(),
            name:              "David Thompson".into(),
            age:               22,
            gender:            Some("Male".into()),
            region:            Region::East,
            plan_type:         PlanTier::Basic,
            tenure:            6,
            contract_type:     "Month-to-month".into(),
            payment_method:    "Electronic Check".into(),
            internet_service:  "DSL".into(),
            online_security:   false,
            tech_support:      false,
            streaming_tv:      true,
            streaming_movies:  false,
            monthly_charges:   35.99,
            total_charges:     215.94,
            churn_probability: 0.82,
            churn_risk:        RiskTier::High,
            top_churn_factors: vec![
                factor("Contract Type", 0.38, "Month-to-month contract increases churn risk"),
                factor("Low Tenure", 0.25, "Very short tenure increases churn risk"),
                factor("Young Age", 0.20, "Younger customers more likely to churn"),
                factor("Payment Method", 0.12, "Electronic check payment increases risk"),
                factor("No Security Services", 0.10, "Lack of add-on services increases risk"),
            ],
            last_activity:     Some("2024-01-08".into()),
            support_tickets:   3,
            avg_call_duration: 12.7,
            data_usage:        25.1,
        },
        CustomerRecord {
            id:                "CUST005".into(),
            name:              "Lisa Wang".into(),
            age:               38,
            gender:            Some("Female".into()),
            region:            Region::North,
            plan_type:         PlanTier::Premium,
            tenure:            24,
            contract_type:     "One year".into(),
            payment_method:    "Credit Card".into(),
            internet_service:  "Fiber".into(),
            online_security:   true,
            tech_support:      false,
            streaming_tv:      true,
            streaming_movies:  true,
            monthly_charges:   75.99,
            total_charges:     1823.76,
            churn_probability: 0.45,
            churn_risk:        RiskTier::Medium,
            top_churn_factors: vec![
                factor("No Tech Support", 0.18, "Lack of tech support increases churn risk"),
                factor("Monthly Charges", 0.12, "Higher charges increase churn risk"),
                factor("Contract Type", 0.08, "One-year contract moderate risk"),
                factor("Internet Service", 0.05, "Fiber service complexity increases risk"),
                factor("Tenure", -0.03, "Good tenure slightly reduces risk"),
            ],
            last_activity:     Some("2024-01-12".into()),
            support_tickets:   4,
            avg_call_duration: 11.8,
            data_usage:        52.3,
        },
        CustomerRecord {
            id:                "CUST006".into(),
            name:              "Robert Martinez".into(),
            age:               55,
            gender:            Some("Male".into()),
            region:            Region::South,
            plan_type:         PlanTier::Enterprise,
            tenure:            54,
            contract_type:     "Two year".into(),
            payment_method:    "Bank Transfer".into(),
            internet_service:  "Fiber".into(),
            online_security:   true,
            tech_support:      true,
            streaming_tv:      true,
            streaming_movies:  true,
            monthly_charges:   109.99,
            total_charges:     5939.45,
            churn_probability: 0.12,
            churn_risk:        RiskTier::Low,
            top_churn_factors: vec![
                factor("Monthly Charges", 0.14, "High monthly charges increase churn risk"),
                factor("Contract Type", -0.18, "Long-term contract reduces churn risk"),
                factor("Tenure", -0.22, "Very long tenure significantly reduces risk"),
                factor("Age", -0.08, "Older customers less likely to churn"),
                factor("Full Services", -0.06, "Complete service package reduces risk"),
            ],
            last_activity:     Some("2024-01-16".into()),
            support_tickets:   0,
            avg_call_duration: 4.2,
            data_usage:        89.7,
        },
    ]
}

pub fn model_metrics() -> ModelMetrics {
    ModelMetrics {
        accuracy:  0.87,
        precision: 0.84,
        recall:    0.89,
        f1_score:  0.86,
        roc_auc:   0.92,
    }
}

pub fn dashboard_stats() -> DashboardStats {
    DashboardStats {
        total_customers:       2847,
        churned_customers:     421,
        high_risk_customers:   156,
        churn_rate:            14.8,
        avg_churn_probability: 0.34,
        revenue_at_risk:       89_750.0,
    }
}
