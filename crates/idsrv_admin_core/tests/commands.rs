mod common;

use common::AdminFixture;
use idsrv_admin_core::{
    execute, run_script, BindError, Client, ClientStore, CommandError, CommandKind, Output, ParamSet,
    RepoError, Scope, ScopeStore, Script,
};
use serde_json::json;

#[test]
fn new_scope_output_pipes_into_add_scope() {
    let mut fixture = AdminFixture::new();
    let mut service = fixture.service();

    let built = execute(
        &mut service,
        CommandKind::NewScope,
        &ParamSet::new().with("Name", "api"),
        None,
    )
    .unwrap();
    let added = execute(
        &mut service,
        CommandKind::AddScope,
        &ParamSet::new(),
        Some(built.clone()),
    )
    .unwrap();
    drop(service);

    assert_eq!(added, built);
    assert_eq!(
        fixture.scope_store().list_scopes(false).unwrap(),
        vec![Scope::new("api")]
    );
}

#[test]
fn add_client_builds_from_params_without_input() {
    let mut fixture = AdminFixture::new();
    let params = ParamSet::new()
        .with("ClientId", "web")
        .with("ClientName", "Web");

    let output = execute(&mut fixture.service(), CommandKind::AddClient, &params, None).unwrap();

    assert_eq!(output, Output::Client(Client::new("web", "Web")));
    let listed = execute(
        &mut fixture.service(),
        CommandKind::GetClients,
        &ParamSet::new(),
        None,
    )
    .unwrap();
    assert_eq!(listed, Output::Clients(vec![Client::new("web", "Web")]));
}

#[test]
fn add_scope_rejects_input_combined_with_params() {
    let mut fixture = AdminFixture::new();
    let err = execute(
        &mut fixture.service(),
        CommandKind::AddScope,
        &ParamSet::new().with("Name", "other"),
        Some(Output::Scope(Scope::new("api"))),
    )
    .unwrap_err();

    assert!(matches!(err, CommandError::InputWithParams { command: "add-scope" }));
    assert!(fixture.scope_store().list_scopes(false).unwrap().is_empty());
}

#[test]
fn add_client_rejects_a_piped_scope() {
    let mut fixture = AdminFixture::new();
    let err = execute(
        &mut fixture.service(),
        CommandKind::AddClient,
        &ParamSet::new(),
        Some(Output::Scope(Scope::new("api"))),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CommandError::UnexpectedInput {
            command: "add-client",
            found: "scope"
        }
    ));
}

#[test]
fn builders_reject_piped_input() {
    let mut fixture = AdminFixture::new();
    let err = execute(
        &mut fixture.service(),
        CommandKind::NewScopeClaim,
        &ParamSet::new().with("Name", "email"),
        Some(Output::Scope(Scope::new("api"))),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CommandError::UnexpectedInput {
            command: "new-scope-claim",
            found: "scope"
        }
    ));
}

#[test]
fn empty_output_is_not_piped_as_input() {
    let mut fixture = AdminFixture::new();
    let claim = execute(
        &mut fixture.service(),
        CommandKind::NewScopeClaim,
        &ParamSet::new().with("Name", "email"),
        Some(Output::None),
    )
    .unwrap();
    assert!(matches!(claim, Output::ScopeClaim(_)));

    let script = Script::from_json_str(
        r#"{"pipelines": [[{"command": "install-database"}, {"command": "get-scopes"}]]}"#,
    )
    .unwrap();
    let outputs = run_script(&mut fixture.service(), &script).unwrap();
    assert_eq!(outputs, vec![Output::Scopes(Vec::new())]);
}

#[test]
fn get_scopes_honours_public_only() {
    let mut fixture = AdminFixture::new();
    let mut service = fixture.service();
    for (name, public) in [("api", true), ("internal", false)] {
        let params = ParamSet::new()
            .with("Name", name)
            .with("ShowInDiscoveryDocument", public);
        execute(&mut service, CommandKind::AddScope, &params, None).unwrap();
    }

    let all = execute(&mut service, CommandKind::GetScopes, &ParamSet::new(), None).unwrap();
    let public = execute(
        &mut service,
        CommandKind::GetScopes,
        &ParamSet::new().with("PublicOnly", true),
        None,
    )
    .unwrap();

    match (all, public) {
        (Output::Scopes(all), Output::Scopes(public)) => {
            assert_eq!(all.len(), 2);
            assert_eq!(public.len(), 1);
            assert_eq!(public[0].name, "api");
        }
        other => panic!("unexpected outputs: {other:?}"),
    }
}

#[test]
fn remove_commands_delete_and_report_missing() {
    let mut fixture = AdminFixture::new();
    let mut service = fixture.service();
    execute(
        &mut service,
        CommandKind::AddScope,
        &ParamSet::new().with("Name", "api"),
        None,
    )
    .unwrap();

    let removed = execute(
        &mut service,
        CommandKind::RemoveScope,
        &ParamSet::new().with("Name", "api"),
        None,
    )
    .unwrap();
    assert_eq!(removed, Output::None);

    let err = execute(
        &mut service,
        CommandKind::RemoveClient,
        &ParamSet::new().with("ClientId", "ghost"),
        None,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CommandError::Repo(RepoError::NotFound { key, .. }) if key == "ghost"
    ));
}

#[test]
fn bind_errors_stop_before_persistence() {
    let mut fixture = AdminFixture::new();
    let params = ParamSet::new()
        .with("ClientId", "web")
        .with("ClientName", "Web")
        .with("AccessTokenLifetime", -1);

    let err = execute(&mut fixture.service(), CommandKind::AddClient, &params, None).unwrap_err();

    assert!(matches!(
        err,
        CommandError::Bind(BindError::OutOfRange {
            name: "AccessTokenLifetime",
            ..
        })
    ));
    assert!(fixture.client_store().find_client_by_id("web").unwrap().is_none());
}

#[test]
fn remove_then_install_database_starts_empty() {
    let mut fixture = AdminFixture::new();
    let mut service = fixture.service();
    execute(
        &mut service,
        CommandKind::AddScope,
        &ParamSet::new().with("Name", "api"),
        None,
    )
    .unwrap();

    execute(&mut service, CommandKind::RemoveDatabase, &ParamSet::new(), None).unwrap();
    let err = execute(&mut service, CommandKind::GetScopes, &ParamSet::new(), None).unwrap_err();
    assert!(matches!(err, CommandError::Repo(RepoError::Db(_))));

    execute(&mut service, CommandKind::InstallDatabase, &ParamSet::new(), None).unwrap();
    let listed = execute(&mut service, CommandKind::GetScopes, &ParamSet::new(), None).unwrap();
    assert_eq!(listed, Output::Scopes(Vec::new()));
}

#[test]
fn decoded_input_feeds_add_scope() {
    let mut fixture = AdminFixture::new();
    let value = serde_json::to_value(Scope::new("api")).unwrap();
    let input = CommandKind::AddScope.decode_input(value).unwrap();

    execute(&mut fixture.service(), CommandKind::AddScope, &ParamSet::new(), Some(input)).unwrap();
    assert_eq!(fixture.scope_store().list_scopes(false).unwrap().len(), 1);

    let err = CommandKind::AddClient
        .decode_input(json!({ "client_id": "x" }))
        .unwrap_err();
    assert!(matches!(err, CommandError::InvalidInput { command: "add-client", .. }));
}
