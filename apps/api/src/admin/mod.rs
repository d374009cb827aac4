// Administrative console: key guard, dashboard numbers, application feed and
// user management. Catalog curation handlers live in `catalog::handlers`.

pub mod guard;
pub mod handlers;
