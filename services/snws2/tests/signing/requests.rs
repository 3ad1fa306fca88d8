use super::{authorization, test_credential, test_date, TEST_TOKEN_ID, TEST_TOKEN_SECRET};
use anyhow::Result;
use http::{header, Request};
use log::debug;
use pretty_assertions::assert_eq;
use snsign_core::{Context, ErrorKind, SignRequest, Signer, StaticEnv};
use snsign_snws2::constants::{SOLARNETWORK_TOKEN_ID, SOLARNETWORK_TOKEN_SECRET};
use snsign_snws2::{DefaultCredentialProvider, RequestSigner, StaticCredentialProvider};
use std::collections::HashMap;

#[tokio::test]
async fn test_signer_with_static_credential() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new(TEST_TOKEN_ID, TEST_TOKEN_SECRET),
        RequestSigner::new().with_time(test_date()),
    );

    let (mut parts, body) = Request::get("http://localhost/api/query?foo=bar&bim=bam")
        .body(())?
        .into_parts();
    signer.sign(&mut parts).await?;
    let req = Request::from_parts(parts, body);
    debug!("signed request: {req:?}");

    assert_eq!(req.headers()[header::DATE], "Tue, 25 Apr 2017 14:30:00 GMT");
    assert_eq!(req.headers()[header::HOST], "localhost");
    assert_eq!(
        req.headers()[header::AUTHORIZATION].to_str()?,
        authorization(
            "date;host",
            "c597ed8061d9d12e12ead3d8d6fc03b28a877e8639548f31556b4760be09a4b8"
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_signer_with_env_credential() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new().with_env(StaticEnv {
        envs: HashMap::from_iter([
            (SOLARNETWORK_TOKEN_ID.to_string(), TEST_TOKEN_ID.to_string()),
            (
                SOLARNETWORK_TOKEN_SECRET.to_string(),
                TEST_TOKEN_SECRET.to_string(),
            ),
        ]),
    });
    let signer = Signer::new(
        ctx,
        DefaultCredentialProvider::new(),
        RequestSigner::new().with_sn_date(true).with_time(test_date()),
    );

    let (mut parts, _) = Request::get("https://localhost:443/api/test")
        .body(())?
        .into_parts();
    signer.sign(&mut parts).await?;

    assert!(!parts.headers.contains_key(header::DATE));
    assert_eq!(parts.headers["x-sn-date"], "Tue, 25 Apr 2017 14:30:00 GMT");
    assert_eq!(
        parts.headers[header::AUTHORIZATION].to_str()?,
        authorization(
            "host;x-sn-date",
            "c14fe9f67560fb9a37d2aa7c40b40c260a5936f999877e2469b8ddb1da7c0eb9"
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_signer_without_credential() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new().with_env(StaticEnv {
        envs: HashMap::new(),
    });
    let signer = Signer::new(ctx, DefaultCredentialProvider::new(), RequestSigner::new());

    let (mut parts, _) = Request::get("http://localhost/api/test")
        .body(())?
        .into_parts();
    let err = signer.sign(&mut parts).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    Ok(())
}

#[tokio::test]
async fn test_request_signer_reused() -> Result<()> {
    let signer = RequestSigner::new().with_time(test_date());
    let cred = test_credential();

    for _ in 0..2 {
        let (mut parts, _) = Request::get("http://localhost/api/test")
            .body(())?
            .into_parts();
        signer
            .sign_request(&Context::new(), &mut parts, Some(&cred))
            .await?;
        assert_eq!(
            parts.headers[header::AUTHORIZATION].to_str()?,
            authorization(
                "date;host",
                "4739139d3d370f147b6585795c309b1c6d7d7f59943081f7dd943f689cfa59a3"
            )
        );
    }
    Ok(())
}
