pub mod db;
pub mod category {
    pub mod entity;
    pub mod repository;
}
pub mod product {
    pub mod entity;
    pub mod repository;
}
pub mod cart {
    pub mod entity;
    pub mod repository;
}
pub mod order {
    pub mod entity;
    pub mod repository;
}
pub mod settings {
    pub mod entity;
    pub mod repository;
}
