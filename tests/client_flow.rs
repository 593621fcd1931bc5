//! End-to-end flow against a mock server: reconcile the machine list, then
//! dispatch a command against it.

use htb_client::{dispatch, ApiClient, Command};
use httpmock::prelude::*;

const TOKEN: &str = "itk-1234";

fn client(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(&server.base_url(), TOKEN)
}

fn mock_catalog(server: &MockServer) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/machines/owns")
            .query_param("api_token", TOKEN);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"id": 1, "owned_user": true, "owned_root": true}]"#);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/machines/get/all/")
            .query_param("api_token", TOKEN);
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"[{"id": 1, "name": "Lame", "os": "Linux", "rating": 4.1, "retired": true},
                    {"id": 5, "name": "Jerry", "os": "Windows", "rating": 3.9, "retired": false}]"#,
            );
    });
}

#[tokio::test]
async fn reconcile_then_spawn_by_name() {
    let server = MockServer::start();
    mock_catalog(&server);
    let spawn = server.mock(|when, then| {
        when.method(POST)
            .path("/vm/vip/assign/5")
            .query_param("api_token", TOKEN);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success": "1", "id": 5, "status": "spawning"}"#);
    });

    let api = client(&server);
    let machines = api.reconcile().await.unwrap();
    assert_eq!(machines.len(), 2);
    assert!(machines[0].owned_user && machines[0].owned_root);
    assert!(!machines[0].active);
    assert!(machines[1].active);

    let code = dispatch(&api, &machines, "vip", Command::Spawn, "jerry")
        .await
        .unwrap();
    assert_eq!(code, 0);
    spawn.assert();
}

#[tokio::test]
async fn free_lab_never_reaches_the_vm_endpoints() {
    let server = MockServer::start();
    mock_catalog(&server);
    let vm = server.mock(|when, then| {
        when.method(POST);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success": "1"}"#);
    });

    let api = client(&server);
    let machines = api.reconcile().await.unwrap();

    for command in [Command::Spawn, Command::Terminate] {
        let code = dispatch(&api, &machines, "free", command, "Jerry")
            .await
            .unwrap();
        assert_eq!(code, 1);
    }
    assert_eq!(vm.hits(), 0);
}

#[tokio::test]
async fn rejected_flag_submission_exits_one() {
    let server = MockServer::start();
    mock_catalog(&server);
    server.mock(|when, then| {
        when.method(POST)
            .path("/machines/own")
            .x_www_form_urlencoded_tuple("id", "5")
            .x_www_form_urlencoded_tuple("flag", "0000")
            .x_www_form_urlencoded_tuple("difficulty", "50");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"success": "0", "message": "incorrect flag"}"#);
    });

    let api = client(&server);
    let machines = api.reconcile().await.unwrap();
    let command = Command::Own {
        flag: "0000".to_string(),
        difficulty: 5,
    };
    let code = dispatch(&api, &machines, "vip", command, "Jerry")
        .await
        .unwrap();
    assert_eq!(code, 1);
}
