use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use pharmacy_orders_api::{
    config::AppConfig,
    db::{OrmConn, create_orm_conn, run_migrations},
    dto::{auth::Claims, stores::RegisterStoreRequest},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    middleware::auth::{Actor, Role},
    services::{approval_service, store_service},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url, 2).await?;
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&orm, "admin@example.com", "admin").await?;
    ensure_user(&orm, "customer@example.com", "customer").await?;

    let state = AppState::new(orm, config.policy, config.jwt_secret.as_str());
    let admin = Actor::admin(admin_id);

    let stores = [
        ("City Care Pharmacy", "Anita Menon", "KL-ERN-2024-0101", "Ernakulam", "M.G Road"),
        ("Green Cross Medicals", "Rahul Das", "KL-TVM-2024-0202", "Thiruvananthapuram", "Pattom"),
        ("Wellness Drug House", "Fathima K", "KL-KZD-2024-0303", "Kozhikode", "Mavoor Road"),
        ("Harbour Medicals", "Joseph P", "KL-ALP-2024-0404", "Alappuzha", "Beach Road"),
    ];

    let mut created = Vec::new();
    for (i, (name, owner, license, city, area)) in stores.into_iter().enumerate() {
        let payload = RegisterStoreRequest {
            store_name: name.into(),
            owner_name: owner.into(),
            phone: format!("98765432{i:02}"),
            email: format!("store{i}@example.com"),
            license_number: license.into(),
            city: city.into(),
            area: area.into(),
            pincode: "682001".into(),
            address: format!("{area}, {city}, Kerala"),
            image_ref: None,
            license_file_ref: None,
        };
        match store_service::register_store(&state, payload).await {
            Ok(store) => created.push(store),
            Err(err) => println!("Skipped {name}: {err}"),
        }
    }

    // Approved, rejected, pending, removed.
    if let Some(store) = created.first() {
        approval_service::approve_store(&state, &admin, store.id).await?;
    }
    if let Some(store) = created.get(1) {
        approval_service::reject_store(&state, &admin, store.id, "license document unreadable")
            .await?;
    }

    if let Some(store) = created.get(3) {
        approval_service::approve_store(&state, &admin, store.id).await?;
        approval_service::remove_store(&state, &admin, store.id).await?;
    }

    println!("Seeded {} stores", created.len());
    println!(
        "Admin token: Bearer {}",
        dev_token(&config.jwt_secret, admin_id, Role::Admin)?
    );
    for store in &created {
        println!(
            "Owner token for {} ({}): Bearer {}",
            store.store_name,
            store.id,
            dev_token(&config.jwt_secret, store.id, Role::Owner)?
        );
    }
    Ok(())
}

async fn ensure_user(orm: &OrmConn, email: &str, role: &str) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        role: Set(role.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(orm)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user.id)
}

fn dev_token(secret: &str, sub: Uuid, role: Role) -> anyhow::Result<String> {
    let exp = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| anyhow::anyhow!("Failed to set expiration"))?;
    let claims = Claims {
        sub: sub.to_string(),
        role,
        exp: exp.timestamp() as usize,
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}
