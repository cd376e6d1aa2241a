#[doc(hidden)]
pub mod all;
#[doc(hidden)]
pub mod any;
#[doc(hidden)]
pub mod anyo;
#[doc(hidden)]
pub mod closure;
#[doc(hidden)]
pub mod conda;
#[doc(hidden)]
pub mod conde;
#[doc(hidden)]
pub mod condu;
#[doc(hidden)]
pub mod fngoal;
#[doc(hidden)]
pub mod fresh;
#[doc(hidden)]
pub mod onceo;
#[doc(hidden)]
pub mod project;

#[doc(inline)]
pub use anyo::anyo;

#[doc(inline)]
pub use conda::conda;

#[doc(inline)]
pub use conde::conde;

#[doc(inline)]
pub use condu::condu;

#[doc(inline)]
pub use onceo::onceo;
