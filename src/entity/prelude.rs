//! 预导入模块，方便使用

pub use super::profiles::{
    ActiveModel as ProfileActiveModel, Entity as Profiles, Model as ProfileModel,
};
pub use super::progress_sheets::{
    ActiveModel as ProgressSheetActiveModel, Entity as ProgressSheets,
    Model as ProgressSheetModel,
};
pub use super::revoked_tokens::{
    ActiveModel as RevokedTokenActiveModel, Entity as RevokedTokens, Model as RevokedTokenModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
