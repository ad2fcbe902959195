pub mod application {
    pub mod shared {
        pub mod deadline;
    }
    pub mod product {
        pub mod get_all;
        pub mod get_by_id;
        pub mod get_home;
    }
    pub mod category {
        pub mod get_all;
    }
    pub mod cart {
        pub mod add_item;
        pub mod clear;
        pub mod get;
        pub mod reconcile;
        pub mod remove_item;
        pub mod session;
        pub mod update_quantity;
    }
    pub mod checkout {
        pub mod session;
    }
    pub mod payment {
        pub mod get_options;
    }
    pub mod order {
        pub mod get_history;
        pub mod submit;
    }
    #[cfg(test)]
    pub(crate) mod test_support;
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod category {
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod get_all;
        }
    }
    pub mod product {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod get_all;
            pub mod get_by_id;
            pub mod get_home;
        }
    }
    pub mod cart {
        pub mod errors;
        pub mod guest_store;
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod add_item;
            pub mod clear;
            pub mod get;
            pub mod reconcile;
            pub mod remove_item;
            pub mod update_quantity;
        }
    }
    pub mod checkout {
        pub mod address;
        pub mod errors;
        pub mod flow;
    }
    pub mod payment {
        pub mod deep_link;
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod use_cases {
            pub mod get_options;
        }
    }
    pub mod order {
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod value_objects;
        pub mod use_cases {
            pub mod get_history;
            pub mod submit;
        }
    }
}
