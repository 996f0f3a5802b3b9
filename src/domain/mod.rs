pub mod article;
pub mod city;
pub mod contact;
pub mod counters;
pub mod errors;
pub mod province;
pub mod school;
pub mod slug;
