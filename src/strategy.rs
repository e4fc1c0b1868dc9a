//! Verification strategy assignment and recommendations.

use serde::{Deserialize, Serialize};

use crate::claims::{Claim, ClaimType, CorrelatedClaim, ExtractedClaim, VerificationMethod};

/// Example claim texts listed per recommendation.
pub const MAX_EXAMPLES: usize = 3;

/// Method for a claim type, and whether the type is verifiable without
/// correlated code.
pub fn method_for(claim_type: ClaimType) -> (VerificationMethod, bool) {
    match claim_type {
        ClaimType::Api => (VerificationMethod::UnitTest, true),
        ClaimType::Performance => (VerificationMethod::Benchmark, true),
        ClaimType::Security => (VerificationMethod::SecurityTest, true),
        ClaimType::Feature => (VerificationMethod::IntegrationTest, false),
        ClaimType::Behavior => (VerificationMethod::PropertyTest, false),
    }
}

impl CorrelatedClaim {
    /// Assign a verification method. Feature and behavior claims are only
    /// verifiable when related code was found.
    pub fn assign_strategy(self) -> Claim {
        let (method, always_verifiable) = method_for(self.claim.claim_type);
        let verifiable = always_verifiable || !self.related_code.is_empty();
        let ExtractedClaim {
            text,
            source_file,
            line_number,
            claim_type,
            confidence,
            context,
        } = self.claim;

        Claim {
            text,
            source_file,
            line_number,
            claim_type,
            confidence,
            context,
            verifiable,
            verification_method: Some(method),
            related_code: self.related_code,
        }
    }
}

/// Kind of verification work a recommendation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    UnitTesting,
    PerformanceTesting,
    SecurityTesting,
    IntegrationTesting,
    PropertyTesting,
    DocumentationReview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub description: String,
    pub examples: Vec<String>,
    pub suggested_approach: String,
}

impl Recommendation {
    fn new(
        kind: RecommendationKind,
        priority: Priority,
        description: String,
        claims: &[&Claim],
        suggested_approach: &str,
    ) -> Self {
        Self {
            kind,
            priority,
            description,
            examples: claims
                .iter()
                .take(MAX_EXAMPLES)
                .map(|c| c.text.clone())
                .collect(),
            suggested_approach: suggested_approach.to_string(),
        }
    }

    /// Recommendation for a group of verifiable claims sharing a method.
    fn for_method(method: VerificationMethod, claims: &[&Claim]) -> Self {
        let n = claims.len();
        match method {
            VerificationMethod::UnitTest => Self::new(
                RecommendationKind::UnitTesting,
                Priority::High,
                format!("Write unit tests for {} API claims", n),
                claims,
                "Create test cases that verify each function/method exists and behaves as documented",
            ),
            VerificationMethod::Benchmark => Self::new(
                RecommendationKind::PerformanceTesting,
                Priority::Medium,
                format!("Create benchmarks for {} performance claims", n),
                claims,
                "Implement performance tests to measure and verify performance claims",
            ),
            VerificationMethod::SecurityTest => Self::new(
                RecommendationKind::SecurityTesting,
                Priority::High,
                format!("Verify {} security claims", n),
                claims,
                "Create security test cases and use security analysis tools",
            ),
            VerificationMethod::IntegrationTest => Self::new(
                RecommendationKind::IntegrationTesting,
                Priority::Medium,
                format!("Create integration tests for {} feature claims", n),
                claims,
                "Write end-to-end tests that verify feature functionality",
            ),
            VerificationMethod::PropertyTest => Self::new(
                RecommendationKind::PropertyTesting,
                Priority::Medium,
                format!("Write property tests for {} behavior claims", n),
                claims,
                "Generate inputs and check that the documented behavior holds for all of them",
            ),
        }
    }
}

/// Build recommendations: one per verification method in order of first
/// appearance, then one for all unverifiable claims.
pub fn recommendations(claims: &[Claim]) -> Vec<Recommendation> {
    let mut groups: Vec<(VerificationMethod, Vec<&Claim>)> = Vec::new();

    for claim in claims.iter().filter(|c| c.verifiable) {
        let Some(method) = claim.verification_method else {
            continue;
        };
        match groups.iter_mut().find(|(m, _)| *m == method) {
            Some((_, group)) => group.push(claim),
            None => groups.push((method, vec![claim])),
        }
    }

    let mut recs: Vec<Recommendation> = groups
        .iter()
        .map(|(method, group)| Recommendation::for_method(*method, group))
        .collect();

    let unverifiable: Vec<&Claim> = claims.iter().filter(|c| !c.verifiable).collect();
    if !unverifiable.is_empty() {
        recs.push(Recommendation::new(
            RecommendationKind::DocumentationReview,
            Priority::Low,
            format!(
                "Review {} claims that couldn't be automatically verified",
                unverifiable.len()
            ),
            &unverifiable,
            "Manually review these claims and update documentation or add verification methods",
        ));
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(text: &str, claim_type: ClaimType) -> ExtractedClaim {
        ExtractedClaim {
            text: text.to_string(),
            source_file: "README.md".to_string(),
            line_number: 1,
            claim_type,
            confidence: 0.6,
            context: "General".to_string(),
        }
    }

    fn strategized(text: &str, claim_type: ClaimType, related: &[&str]) -> Claim {
        extracted(text, claim_type)
            .correlate(related.iter().map(|s| s.to_string()).collect())
            .assign_strategy()
    }

    #[test]
    fn test_api_always_unit_test() {
        let claim = strategized("parse()", ClaimType::Api, &[]);
        assert_eq!(claim.verification_method, Some(VerificationMethod::UnitTest));
        assert!(claim.verifiable);
        assert_eq!(claim.text, "parse()");
        assert_eq!(claim.line_number, 1);
    }

    #[test]
    fn test_feature_verifiable_only_with_code() {
        let without = strategized("caching", ClaimType::Feature, &[]);
        assert_eq!(without.verification_method, Some(VerificationMethod::IntegrationTest));
        assert!(!without.verifiable);

        let with = strategized("caching", ClaimType::Feature, &["src/cache.py"]);
        assert!(with.verifiable);
        assert_eq!(with.related_code, vec!["src/cache.py"]);
    }

    #[test]
    fn test_behavior_property_test() {
        let claim = strategized("returns sorted output", ClaimType::Behavior, &[]);
        assert_eq!(claim.verification_method, Some(VerificationMethod::PropertyTest));
        assert!(!claim.verifiable);
    }

    #[test]
    fn test_performance_and_security_verifiable() {
        assert!(strategized("1000 operations", ClaimType::Performance, &[]).verifiable);
        assert!(strategized("SQL injection", ClaimType::Security, &[]).verifiable);
    }

    #[test]
    fn test_recommendations_grouped_in_first_appearance_order() {
        let claims = vec![
            strategized("1000 operations", ClaimType::Performance, &[]),
            strategized("a()", ClaimType::Api, &[]),
            strategized("b()", ClaimType::Api, &[]),
            strategized("c()", ClaimType::Api, &[]),
            strategized("d()", ClaimType::Api, &[]),
            strategized("caching", ClaimType::Feature, &[]),
        ];

        let recs = recommendations(&claims);
        assert_eq!(recs.len(), 3);

        assert_eq!(recs[0].kind, RecommendationKind::PerformanceTesting);
        assert_eq!(recs[0].priority, Priority::Medium);

        assert_eq!(recs[1].kind, RecommendationKind::UnitTesting);
        assert_eq!(recs[1].description, "Write unit tests for 4 API claims");
        assert_eq!(recs[1].examples, vec!["a()", "b()", "c()"]);

        assert_eq!(recs[2].kind, RecommendationKind::DocumentationReview);
        assert_eq!(recs[2].priority, Priority::Low);
        assert_eq!(
            recs[2].description,
            "Review 1 claims that couldn't be automatically verified"
        );
    }

    #[test]
    fn test_no_claims_no_recommendations() {
        assert!(recommendations(&[]).is_empty());
    }

    #[test]
    fn test_recommendation_serializes_type_field() {
        let recs = recommendations(&[strategized("x()", ClaimType::Api, &[])]);
        let json = serde_json::to_value(&recs[0]).unwrap();
        assert_eq!(json["type"], "unit_testing");
        assert_eq!(json["priority"], "high");
    }
}
