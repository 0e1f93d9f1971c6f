pub mod consts {
    pub mod consts;
}

pub mod model {
    pub mod person;
    pub mod photo;
    pub mod statement;
}

pub mod directory {
    pub mod directory;
    pub mod options;
    pub mod seed;
    pub mod validation;

    pub mod table {
        pub mod query;
        pub mod row;
        pub mod table;
    }
}

pub mod persistence;

pub mod view {
    pub mod controller;
    pub mod pagination;
    pub mod sort;
    pub mod state;
    pub mod stats;
}

pub mod export {
    pub mod csv;
}

pub mod capture {
    pub mod decoder;
    pub mod device;
    pub mod payload;
    pub mod session;
}
