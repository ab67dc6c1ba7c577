//! End-to-end tests for the dashboard, job posting and postal code search

mod common;

use common::{location, TestClient, TestServer, BANGALORE_PINCODE, PUNE_PINCODE};
use jobboard_server::server::JOB_POSTED_MESSAGE;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_posted_job_shows_on_dashboard() {
    let server = TestServer::spawn().await;
    let client = TestClient::alice(server.base_url.clone()).await;

    let response = client.provide("Acme Foods", PUNE_PINCODE).await;
    assert_eq!(location(&response), "/home");

    let dashboard = client.dashboard().await;
    assert_eq!(dashboard["flash"][0], JOB_POSTED_MESSAGE);
    assert_eq!(dashboard["total_jobs"], 1);
    assert_eq!(dashboard["total_users"], 1);

    let job = &dashboard["jobs"][0];
    assert_eq!(job["company_name"], "Acme Foods");
    assert_eq!(job["pincode"], PUNE_PINCODE);
    assert_eq!(job["salary"], "25000/month");
    assert_eq!(job["poster_id"], dashboard["user"]["id"]);
}

#[tokio::test]
async fn test_dashboard_lists_jobs_of_everyone() {
    let server = TestServer::spawn().await;
    let alice = TestClient::alice(server.base_url.clone()).await;
    let bob = TestClient::bob(server.base_url.clone()).await;

    alice.provide("Acme Foods", PUNE_PINCODE).await;
    bob.provide("Bolt Couriers", BANGALORE_PINCODE).await;

    let dashboard = alice.dashboard().await;
    assert_eq!(dashboard["total_users"], 2);
    assert_eq!(dashboard["total_jobs"], 2);
    let companies: Vec<&str> = dashboard["jobs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|job| job["company_name"].as_str().unwrap())
        .collect();
    assert_eq!(companies, vec!["Acme Foods", "Bolt Couriers"]);
}

#[tokio::test]
async fn test_search_matches_exact_pincode() {
    let server = TestServer::spawn().await;
    let client = TestClient::alice(server.base_url.clone()).await;

    client.provide("Acme Foods", PUNE_PINCODE).await;
    client.provide("Bolt Couriers", BANGALORE_PINCODE).await;
    client.provide("Crux Labs", " 411001 ").await;

    let response = client.search(PUNE_PINCODE).await;
    assert_eq!(response.status(), StatusCode::OK);
    let result: Value = response.json().await.unwrap();
    assert_eq!(result["pincode"], PUNE_PINCODE);
    let jobs = result["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 2);
    assert!(jobs.iter().all(|job| job["pincode"] == PUNE_PINCODE));

    let result: Value = client.search(" 560001 ").await.json().await.unwrap();
    assert_eq!(result["pincode"], BANGALORE_PINCODE);
    assert_eq!(result["jobs"].as_array().unwrap().len(), 1);

    let result: Value = client.search("999999").await.json().await.unwrap();
    assert!(result["jobs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_search_returns_nothing() {
    let server = TestServer::spawn().await;
    let client = TestClient::alice(server.base_url.clone()).await;
    client.provide("Acme Foods", PUNE_PINCODE).await;

    let result: Value = client.search("").await.json().await.unwrap();
    assert!(result["jobs"].as_array().unwrap().is_empty());

    let response = client
        .client
        .post(format!("{}/search", client.base_url))
        .form(&[("other", "field")])
        .send()
        .await
        .unwrap();
    let result: Value = response.json().await.unwrap();
    assert!(result["jobs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_provide_with_missing_field_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::alice(server.base_url.clone()).await;

    let response = client
        .provide_form(&[
            ("company_name", "Acme Foods"),
            ("address", "MG Road 7"),
            ("pincode", PUNE_PINCODE),
            ("salary", "25000/month"),
            ("job_type", ""),
            ("phone", "9876543210"),
        ])
        .await;
    assert_eq!(location(&response), "/provide");

    let response = client.provide_view().await;
    assert_eq!(response.status(), StatusCode::OK);
    let view: Value = response.json().await.unwrap();
    assert_eq!(view["flash"][0], "Please fill in the job_type field.");

    assert_eq!(client.dashboard().await["total_jobs"], 0);
}

#[tokio::test]
async fn test_incomplete_profile_can_still_browse() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());
    client.login("carol", "777", "pw").await;

    let dashboard = client.dashboard().await;
    assert_eq!(dashboard["user"]["handle"], "carol@777");
    assert!(dashboard["user"]["profile"].is_null());
}
