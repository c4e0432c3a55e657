mod common;

use anyhow::Result;
use common::test_service;
use michango::application::AppError;

#[tokio::test]
async fn test_add_member_is_listed_once() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let alice = service.add_member("Alice").await?;
    assert_eq!(alice.name, "Alice");

    let members = service.list_members().await?;
    let alices: Vec<_> = members.iter().filter(|m| m.name == "Alice").collect();
    assert_eq!(alices.len(), 1);
    assert_eq!(alices[0].id, alice.id);

    Ok(())
}

#[tokio::test]
async fn test_members_are_listed_alphabetically() -> Result<()> {
    let (service, _temp) = test_service().await?;

    for name in ["Mary", "Joseph", "Agnes", "Peter"] {
        service.add_member(name).await?;
    }

    let names: Vec<String> = service
        .list_members()
        .await?
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["Agnes", "Joseph", "Mary", "Peter"]);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_member_is_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.add_member("Alice").await?;
    let result = service.add_member("Alice").await;
    assert!(matches!(result, Err(AppError::DuplicateName(ref name)) if name == "Alice"));

    let members = service.list_members().await?;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "Alice");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_check_applies_after_trimming() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.add_member("Alice").await?;
    let result = service.add_member("  Alice ").await;
    assert!(matches!(result, Err(AppError::DuplicateName(_))));
    assert_eq!(service.list_members().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_member_names_are_case_sensitive() -> Result<()> {
    let (service, _temp) = test_service().await?;

    service.add_member("Alice").await?;
    service.add_member("alice").await?;
    assert_eq!(service.list_members().await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_empty_member_name_is_rejected() -> Result<()> {
    let (service, _temp) = test_service().await?;

    assert!(matches!(
        service.add_member("").await,
        Err(AppError::EmptyMemberName)
    ));
    assert!(matches!(
        service.add_member("   ").await,
        Err(AppError::EmptyMemberName)
    ));
    assert!(service.list_members().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_find_member_by_name() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let alice = service.add_member("Alice").await?;
    assert_eq!(service.find_member("Alice").await?, alice);
    assert!(matches!(
        service.find_member("Bob").await,
        Err(AppError::MemberNotFound(_))
    ));

    Ok(())
}
