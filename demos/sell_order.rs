//! Sell order walkthrough against the Aliniex sandbox.
//!
//! This example shows how to:
//! 1. Build a client from environment variables
//! 2. Check the partner wallet balance
//! 3. Normalise and look up a user's KYC
//! 4. Decode a payment QR code
//! 5. Create a sell order and poll its details
//!
//! Required: ALINIEX_PARTNER_CODE, ALINIEX_SECRET_KEY and ALINIEX_PRIVATE_KEY_PATH
//! (or ALINIEX_PRIVATE_KEY). ALINIEX_BASE_URL defaults to the sandbox.

use aliniex_sdk::converters::{split_phone_number, to_alpha2_country_code};
use aliniex_sdk::{
    AliniexClient, ClientConfig, CreateOrderRequest, Currency, FiatCurrency,
    GetOrderDetailsRequest, GetQrCodeInfoRequest, GetWalletBalanceRequest, KycInformationRequest,
};
use std::time::{SystemTime, UNIX_EPOCH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("=== Aliniex SDK Example ===\n");

    let client = AliniexClient::from_env(ClientConfig::default())?;
    println!(
        "Partner {} at {}\n",
        client.partner_code(),
        client.base_url()
    );

    let user_email =
        std::env::var("ALINIEX_USER_EMAIL").unwrap_or_else(|_| "user@example.com".to_string());

    // === Step 1: Wallet balance ===
    println!("1. Checking USDT balance...");
    let balance = client
        .get_wallet_balance(&GetWalletBalanceRequest {
            currency: Currency::Usdt,
        })
        .await?;
    match balance.data {
        Some(wallet) if balance.success => println!("   Balance: {}\n", wallet.balance),
        _ => println!("   Rejected ({}): {}\n", balance.error_code, balance.message),
    }

    // === Step 2: KYC ===
    println!("2. Looking up KYC for {}...", user_email);
    let nationality = to_alpha2_country_code("VNM");
    let (dial_code, local) = split_phone_number("+84 901 234 567", &nationality);
    println!("   Normalised phone: {} {}", dial_code, local);

    let kyc = client
        .get_kyc_information(&KycInformationRequest {
            user_email: user_email.clone(),
        })
        .await?;
    let kyc_verified = kyc
        .data
        .as_ref()
        .and_then(|info| info.kyc_status)
        .map(|status| status == aliniex_sdk::KycStatus::Verified)
        .unwrap_or(false);
    println!("   Verified: {}\n", kyc_verified);

    // === Step 3: QR code ===
    if let Ok(qr_content) = std::env::var("ALINIEX_QR_CONTENT") {
        println!("3. Decoding QR code...");
        let qr = client
            .get_qr_code_info(&GetQrCodeInfoRequest { qr_content })
            .await?;
        match qr.data {
            Some(info) => println!(
                "   {} {} ({:?})\n",
                info.bank_code, info.bank_account_number, info.qr_type
            ),
            None => println!("   Not decoded: {}\n", qr.message),
        }
    } else {
        println!("3. Skipping QR decode (ALINIEX_QR_CONTENT not set)\n");
    }

    // === Step 4: Create sell order ===
    let external_order_id = format!(
        "demo-{}",
        SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis()
    );
    println!("4. Creating sell order {}...", external_order_id);

    let order = client
        .create_order(&CreateOrderRequest {
            currency: Currency::Usdt,
            fiat_amount: 100000.0,
            fiat_currency: FiatCurrency::Vnd,
            bank_code: "970407".to_string(),
            bank_account_number: "888812345678".to_string(),
            external_order_id: external_order_id.clone(),
            webhook_secret_key: "demo-webhook-secret".to_string(),
            user_email,
            user_kyc_verified: kyc_verified,
            content: "demo payment".to_string(),
            extend_info: None,
        })
        .await?;

    if !order.success {
        println!("   Rejected ({}): {}", order.error_code, order.message);
        return Ok(());
    }
    if let Some(created) = &order.data {
        println!(
            "   Send {} {} to {}\n",
            created.token_transfer.amount,
            Currency::Usdt,
            created.token_transfer.wallet_address
        );
    }

    // === Step 5: Order details ===
    println!("5. Fetching order details...");
    let details = client
        .get_order_details(&GetOrderDetailsRequest { external_order_id })
        .await?;
    if let Some(details) = details.data {
        println!("   Status: {:?}", details.status);
    }

    println!("\n=== Example completed ===");

    Ok(())
}
