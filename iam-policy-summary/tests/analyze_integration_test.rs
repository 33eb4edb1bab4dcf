use std::collections::BTreeSet;

use iam_policy_summary::{
    analyze, analyze_input, effect_breakdown, AnalysisResponse, InputFormat, JsonProvider,
    PolicyInput, PolicySummaryError, COMPLEX_PRINCIPAL_PREFIX,
};
use serde_json::{json, Value};

const READ_ONLY_POLICY: &str = r#"{
    "Version": "2012-10-17",
    "Statement": [
        {
            "Sid": "AllowS3ReadOnlyAccess",
            "Effect": "Allow",
            "Action": ["s3:GetObject", "s3:ListBucket"],
            "Resource": ["arn:aws:s3:::example-bucket", "arn:aws:s3:::example-bucket/*"]
        },
        {
            "Sid": "AllowEC2Describe",
            "Effect": "Allow",
            "Action": "ec2:DescribeInstances",
            "Resource": "*"
        }
    ]
}"#;

const TRUST_POLICY: &str = r#"{
    "Version": "2012-10-17",
    "Statement": [
        {
            "Effect": "Allow",
            "Principal": {"AWS": "arn:aws:iam::111122223333:root"},
            "Action": "sts:AssumeRole",
            "Condition": {"Bool": {"aws:MultiFactorAuthPresent": "true"}}
        },
        {
            "Effect": "Allow",
            "Principal": {"Service": ["lambda.amazonaws.com", "ec2.amazonaws.com"]},
            "Action": "sts:AssumeRole"
        },
        {
            "Effect": "Deny",
            "Principal": "*",
            "Action": "sts:AssumeRole",
            "Condition": null
        }
    ]
}"#;

#[test]
fn test_single_statement_example_output() {
    let raw = r#"{"Version":"2012-10-17","Statement":[{"Sid":"S1","Effect":"Allow","Action":"s3:GetObject","Resource":["arn:aws:s3:::bucket/*"],"Principal":"*"}]}"#;

    let summary = analyze(raw).unwrap();
    let output = JsonProvider::stringify(&summary).unwrap();

    assert_eq!(
        output,
        r#"{"policyVersion":"2012-10-17","totalStatements":1,"uniqueActions":["s3:GetObject"],"uniqueResources":["arn:aws:s3:::bucket/*"],"principals":["*"],"statements":[{"sid":"S1","effect":"Allow","actions":["s3:GetObject"],"resources":["arn:aws:s3:::bucket/*"],"principalSummary":"*","hasConditions":false}]}"#
    );
}

#[test]
fn test_read_only_policy() {
    let summary = analyze(READ_ONLY_POLICY).unwrap();

    assert_eq!(summary.total_statements, 2);
    assert_eq!(
        summary.unique_actions,
        BTreeSet::from([
            "ec2:DescribeInstances".to_string(),
            "s3:GetObject".to_string(),
            "s3:ListBucket".to_string(),
        ])
    );
    assert_eq!(summary.unique_resources.len(), 3);
    assert!(summary.principals.is_empty());
    assert_eq!(summary.statements[1].actions, vec!["ec2:DescribeInstances"]);
    assert_eq!(summary.statements[1].resources, vec!["*"]);
    assert!(summary.statements.iter().all(|s| !s.has_conditions));
}

#[test]
fn test_trust_policy_principals() {
    let summary = analyze(TRUST_POLICY).unwrap();

    let expected: BTreeSet<String> = [
        format!("{COMPLEX_PRINCIPAL_PREFIX}{{\"AWS\":\"arn:aws:iam::111122223333:root\"}}"),
        format!(
            "{COMPLEX_PRINCIPAL_PREFIX}{{\"Service\":[\"lambda.amazonaws.com\",\"ec2.amazonaws.com\"]}}"
        ),
        "*".to_string(),
    ]
    .into_iter()
    .collect();

    assert_eq!(summary.principals, expected);
    assert_eq!(summary.unique_actions.len(), 1);
    assert!(summary.unique_resources.is_empty());

    let conditions: Vec<bool> = summary.statements.iter().map(|s| s.has_conditions).collect();
    assert_eq!(conditions, vec![true, false, false]);

    let breakdown = effect_breakdown(&summary);
    assert_eq!(breakdown.get("Allow"), Some(&2));
    assert_eq!(breakdown.get("Deny"), Some(&1));
}

#[test]
fn test_summary_is_stable_across_key_order() {
    let a = r#"{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Principal":{"AWS":"a","Service":"b"},"Action":[{"y":1,"x":2}]}]}"#;
    let b = r#"{"Statement":[{"Action":[{"x":2,"y":1}],"Principal":{"Service":"b","AWS":"a"},"Effect":"Allow"}],"Version":"2012-10-17"}"#;

    let left = JsonProvider::stringify(&analyze(a).unwrap()).unwrap();
    let right = JsonProvider::stringify(&analyze(b).unwrap()).unwrap();

    assert_eq!(left, right);
}

#[test]
fn test_wrapped_and_raw_paths_agree() {
    let envelope = json!({"policyJson": READ_ONLY_POLICY, "policyName": "read-only"}).to_string();

    let wrapped = analyze_input(&PolicyInput::from_text(&envelope, InputFormat::Auto).unwrap());
    let raw = analyze_input(&PolicyInput::from_text(READ_ONLY_POLICY, InputFormat::Auto).unwrap());

    assert_eq!(wrapped.unwrap(), raw.unwrap());
}

#[test]
fn test_malformed_input_yields_no_summary() {
    let response = AnalysisResponse::from(analyze(r#"{"Version": "2012-10-17", "Statement": [{"#));

    let value: Value = serde_json::to_value(&response).unwrap();
    let message = value.as_str().expect("rejection is a plain message");
    assert!(message.starts_with("Error parsing policy: "));
}

#[test]
fn test_schema_error_mentions_missing_member() {
    let err = analyze(r#"{"Statement": []}"#).unwrap_err();

    assert!(matches!(err, PolicySummaryError::Schema { .. }));
    assert!(err.to_string().contains("Version"), "error was: {err}");
}
