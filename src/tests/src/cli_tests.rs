//! Tests for the CLI commands against a ledger file.

use meow_cli::{deploy, new_account, query, submit, Account, CliError, LedgerStore};
use meow_core::{AccountId, Call, LedgerError, LedgerEvent, INITIAL_SUPPLY};
use tempfile::{tempdir, TempDir};

struct Fixture {
    _dir: TempDir,
    store: LedgerStore,
    deployer: Account,
    sender: Account,
}

fn fixture() -> Fixture {
    let dir = tempdir().unwrap();
    let store = LedgerStore::new(dir.path().join("ledger.json"));
    let deployer = Account::new();
    deploy::run(&store, &deployer).unwrap();
    Fixture {
        _dir: dir,
        store,
        deployer,
        sender: Account::new(),
    }
}

/// Tests the new-account command.
#[test]
fn test_new_account_refuses_overwrite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("account.json");

    let id = new_account::run(&path).unwrap();
    assert_eq!(Account::load(&path).unwrap().id().unwrap(), id);
    assert!(matches!(
        new_account::run(&path),
        Err(CliError::AccountError(_))
    ));
}

/// Tests that deployment is persisted and cannot be repeated.
#[test]
fn test_deploy_persists_state() {
    let f = fixture();

    let state = query::state(&f.store).unwrap();
    assert_eq!(state.owner, f.deployer.id().unwrap());
    assert_eq!(state.total_supply, INITIAL_SUPPLY);

    assert!(matches!(
        deploy::run(&f.store, &f.sender),
        Err(CliError::LedgerError(LedgerError::AlreadyInitialized))
    ));
}

/// Tests transfer and burn through the file store.
#[test]
fn test_transfer_and_burn_are_persisted() {
    let f = fixture();
    let to = f.sender.id().unwrap();

    let events = submit::run(&f.store, &f.deployer, Call::Transfer { to, amount: 1000 }).unwrap();
    assert!(matches!(&events[0], LedgerEvent::Transfer(e) if e.to == to && e.amount == 1000));

    submit::run(&f.store, &f.deployer, Call::Burn { amount: 1000 }).unwrap();

    let state = query::state(&f.store).unwrap();
    assert_eq!(state.total_supply, 999_999_999_000);
    assert_eq!(state.version, 2);
    assert_eq!(query::balance(&f.store, &to).unwrap(), 999_999_999_000);

    let log = query::events(&f.store).unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[1].payload().to, AccountId::EMPTY);
}

/// Tests pause control through the CLI.
#[test]
fn test_pause_through_cli() {
    let f = fixture();

    assert!(matches!(
        submit::run(&f.store, &f.sender, Call::Pause),
        Err(CliError::LedgerError(LedgerError::Unauthorized { .. }))
    ));

    submit::run(&f.store, &f.deployer, Call::Pause).unwrap();
    assert!(query::state(&f.store).unwrap().is_paused);

    assert!(matches!(
        submit::run(&f.store, &f.sender, Call::Burn { amount: 1 }),
        Err(CliError::LedgerError(LedgerError::Paused))
    ));

    submit::run(&f.store, &f.deployer, Call::Unpause).unwrap();
    submit::run(&f.store, &f.sender, Call::Burn { amount: 1 }).unwrap();
}

/// Tests that a rejected call leaves the file untouched.
#[test]
fn test_rejected_call_does_not_write() {
    let f = fixture();
    let before = std::fs::read_to_string(f.store.path()).unwrap();

    assert!(submit::run(&f.store, &f.deployer, Call::Burn { amount: u64::MAX }).is_err());

    let after = std::fs::read_to_string(f.store.path()).unwrap();
    assert_eq!(before, after);
}

/// Tests queries against an undeployed ledger file.
#[test]
fn test_queries_before_deploy() {
    let dir = tempdir().unwrap();
    let store = LedgerStore::new(dir.path().join("ledger.json"));

    assert!(matches!(
        query::state(&store),
        Err(CliError::LedgerError(LedgerError::NotInitialized))
    ));
    assert!(query::events(&store).unwrap().is_empty());
}
