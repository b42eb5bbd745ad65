//! Fixed component and dependency lists installed into the generated services.

pub const NEXT_GENERATOR: &str = "create-next-app@latest";
pub const NEST_GENERATOR: &str = "@nestjs/cli@latest";
pub const SHADCN_CLI: &str = "shadcn@latest";
pub const SHADCN_BASE_COLOR: &str = "slate";

pub const SHADCN_COMPONENTS: &[&str] = &[
    "alert-dialog",
    "dialog",
    "alert",
    "badge",
    "avatar",
    "dropdown-menu",
    "empty",
    "skeleton",
    "breadcrumb",
    "kbd",
    "label",
    "pagination",
    "field",
    "item",
    "textarea",
    "tooltip",
    "select",
    "separator",
];

pub const FRONTEND_DEPENDENCIES: &[&str] = &[
    "gsap@latest",
    "lenis@latest",
    "lucide-react@latest",
    "framer-motion@latest",
    "lottie-react@latest",
    "axios@latest",
    "date-fns@latest",
    "sonner@latest",
    "three@latest",
    "@react-three/drei@latest",
    "@tanstack/react-query@latest",
    "react-hook-form@latest",
    "zod@latest",
    "@t3-oss/env-nextjs@latest",
    "clsx@latest",
    "tailwind-merge@latest",
];

pub const BACKEND_DEPENDENCIES: &[&str] = &[
    "helmet@latest",
    "cookie-parser@latest",
    "dotenv@latest",
    "class-validator@latest",
    "class-transformer@latest",
    "@supabase/supabase-js@latest",
    "multer@latest",
    "passport@latest",
    "@nestjs/passport@latest",
    "@nestjs/jwt@latest",
    "@nestjs/config@latest",
    "@nestjs/throttler@latest",
    "argon2@latest",
    "@nestjs/swagger@latest",
    "prisma@latest",
    "@prisma/client@latest",
];

pub const BACKEND_TYPE_DEFINITIONS: &[&str] = &["@types/cookie-parser", "@types/multer"];
