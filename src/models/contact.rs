/// One row of the client/phone left join. Clients with several phones
/// appear once per phone; clients without any appear once with no phone.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct ClientContact {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}
